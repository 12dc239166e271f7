use crate::error::{Result, SimError};
use crate::systems::effects::Rng;

/// RGB color with components in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255.0, g: 255.0, b: 255.0 };

    /// Build a color, clamping each component into [0, 255].
    /// Non-finite components are rejected.
    pub fn new(r: f64, g: f64, b: f64) -> Result<Self> {
        if !(r.is_finite() && g.is_finite() && b.is_finite()) {
            return Err(SimError::NonFinite("color"));
        }
        Ok(Self {
            r: r.clamp(0.0, 255.0),
            g: g.clamp(0.0, 255.0),
            b: b.clamp(0.0, 255.0),
        })
    }

    /// Component-wise average of two colors.
    pub fn average(self, other: Rgb) -> Rgb {
        Rgb {
            r: (self.r + other.r) / 2.0,
            g: (self.g + other.g) / 2.0,
            b: (self.b + other.b) / 2.0,
        }
    }

    /// Light random color, each channel in [100, 255).
    pub fn random_pastel(rng: &mut Rng) -> Rgb {
        Rgb {
            r: rng.range(100.0, 255.0),
            g: rng.range(100.0, 255.0),
            b: rng.range(100.0, 255.0),
        }
    }

    /// Normalised [0, 1] channels for GPU buffers.
    pub fn to_unit(self) -> [f32; 3] {
        [
            (self.r / 255.0) as f32,
            (self.g / 255.0) as f32,
            (self.b / 255.0) as f32,
        ]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}
