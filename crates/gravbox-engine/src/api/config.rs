use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Default number of trail points kept per body.
pub const DEFAULT_TRAIL_LENGTH: usize = 500;

/// Tunable simulation parameters.
///
/// Every field has a default, so a host can send a partial JSON object
/// (`{"gravity": 0.5}`) and leave the rest alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational constant `G`.
    pub gravity: f64,
    /// Center distances are divided by this before the inverse-square law.
    pub distance_scale: f64,
    /// Every pairwise force is divided by this.
    pub force_damping: f64,
    /// Radius floor enforced by shrink adjustments.
    pub min_radius: f64,
    /// Radius change per grow/shrink adjustment.
    pub radius_step: f64,
    /// Velocity change per nudge adjustment.
    pub nudge_step: f64,
    /// Velocity multiplier applied to a drag delta when a body is flung.
    pub fling_factor: f64,
    /// Maximum number of trail points kept per body.
    pub trail_length: usize,
    /// Upper clamp for a frame's dt_scale.
    pub max_dt_scale: f64,
    /// Radius of bodies created by the input controller.
    pub spawn_radius: f64,
    /// Collision burst shape.
    pub burst: BurstConfig,
    /// Seed for the effects RNG.
    pub seed: u64,
}

/// Parameters of the particle burst spawned by every merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Particles per merge.
    pub count: usize,
    /// Speed range `[min, max)`.
    pub speed: (f64, f64),
    /// Particle radius range `[min, max)`.
    pub radius: (f64, f64),
    /// Particle lifetime in ticks.
    pub lifetime: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            distance_scale: 10.0,
            force_damping: 360.0,
            min_radius: 5.0,
            radius_step: 2.0,
            nudge_step: 0.2,
            fling_factor: 0.1,
            trail_length: DEFAULT_TRAIL_LENGTH,
            max_dt_scale: 3.0,
            spawn_radius: 25.0,
            burst: BurstConfig::default(),
            seed: 42,
        }
    }
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 30,
            speed: (1.0, 5.0),
            radius: (2.0, 4.0),
            lifetime: 60,
        }
    }
}

impl SimConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the integrator or the merge pass cannot work with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("gravity", self.gravity),
            ("distance_scale", self.distance_scale),
            ("force_damping", self.force_damping),
            ("min_radius", self.min_radius),
            ("radius_step", self.radius_step),
            ("spawn_radius", self.spawn_radius),
            ("max_dt_scale", self.max_dt_scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !self.nudge_step.is_finite() || !self.fling_factor.is_finite() {
            return Err(SimError::InvalidConfig(
                "nudge_step and fling_factor must be finite".into(),
            ));
        }
        if self.trail_length == 0 {
            return Err(SimError::InvalidConfig("trail_length must be > 0".into()));
        }
        self.burst.validate()
    }
}

impl BurstConfig {
    fn validate(&self) -> Result<()> {
        for (name, (lo, hi)) in [("speed", self.speed), ("radius", self.radius)] {
            if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || hi < lo {
                return Err(SimError::InvalidConfig(format!(
                    "burst {name} range must satisfy 0 <= min <= max, got ({lo}, {hi})"
                )));
            }
        }
        if self.count > 0 && self.lifetime == 0 {
            return Err(SimError::InvalidConfig(
                "burst lifetime must be > 0 when particles are spawned".into(),
            ));
        }
        Ok(())
    }
}
