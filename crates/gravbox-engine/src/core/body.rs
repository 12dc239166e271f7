use std::collections::VecDeque;
use std::f64::consts::PI;

use glam::DVec2;

use crate::api::config::SimConfig;
use crate::api::types::{AdjustAction, BodyId};
use crate::components::color::Rgb;
use crate::error::{Result, SimError};

/// Mass per unit of disc area.
pub const AREA_DENSITY: f64 = 3.0;
/// Glow halo radius relative to the body radius.
pub const GLOW_FACTOR: f64 = 1.8;

/// Mass of a body with the given radius: π·r²·3.
pub fn mass_for_radius(radius: f64) -> f64 {
    PI * radius * radius * AREA_DENSITY
}

/// Glow halo radius for a body with the given radius.
pub fn glow_for_radius(radius: f64) -> f64 {
    radius * GLOW_FACTOR
}

fn ensure_finite(v: DVec2, what: &'static str) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SimError::NonFinite(what))
    }
}

/// Builder describing a body before it is added to a simulation.
/// Mass is not part of the description: it always follows from the radius.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub radius: f64,
    pub color: Rgb,
    pub position: DVec2,
    pub velocity: DVec2,
    pub pinned: bool,
}

impl BodyDesc {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            color: Rgb::WHITE,
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            pinned: false,
        }
    }

    pub fn with_position(mut self, position: DVec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }
}

/// A massed, circular body ("planet").
///
/// `mass` and `glow_radius` are derived from `radius`; the only way to change
/// the radius is `set_radius`, which re-derives both before returning.
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    radius: f64,
    mass: f64,
    glow_radius: f64,
    position: DVec2,
    velocity: DVec2,
    color: Rgb,
    trail: VecDeque<DVec2>,
    pinned: bool,
}

impl Body {
    /// Validate a description and build the body.
    pub fn from_desc(id: BodyId, desc: &BodyDesc) -> Result<Self> {
        if !desc.radius.is_finite() || desc.radius <= 0.0 {
            return Err(SimError::InvalidRadius(desc.radius));
        }
        ensure_finite(desc.position, "position")?;
        ensure_finite(desc.velocity, "velocity")?;
        let color = Rgb::new(desc.color.r, desc.color.g, desc.color.b)?;

        Ok(Self {
            id,
            radius: desc.radius,
            mass: mass_for_radius(desc.radius),
            glow_radius: glow_for_radius(desc.radius),
            position: desc.position,
            velocity: desc.velocity,
            color,
            trail: VecDeque::new(),
            pinned: desc.pinned,
        })
    }

    /// Combine two overlapping bodies.
    ///
    /// Mass is the exact sum, radius follows the area rule sqrt(r1² + r2²),
    /// velocity is momentum-weighted, color is averaged and the position is
    /// the midpoint. The result keeps `a`'s id and trail.
    pub fn merged(a: &Body, b: &Body) -> Body {
        let mass = a.mass + b.mass;
        let radius = (a.radius * a.radius + b.radius * b.radius).sqrt();
        Body {
            id: a.id,
            radius,
            mass,
            glow_radius: glow_for_radius(radius),
            position: (a.position + b.position) / 2.0,
            velocity: (a.velocity * a.mass + b.velocity * b.mass) / mass,
            color: a.color.average(b.color),
            trail: a.trail.clone(),
            pinned: false,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn glow_radius(&self) -> f64 {
        self.glow_radius
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Past positions, oldest first.
    pub fn trail(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.trail.iter().copied()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Whether `point` lies strictly inside the body.
    pub fn contains(&self, point: DVec2) -> bool {
        self.position.distance_squared(point) < self.radius * self.radius
    }

    /// Whether two bodies overlap (center distance below the radius sum).
    pub fn overlaps(&self, other: &Body) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }

    /// Change the radius and re-derive mass and glow.
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidRadius(radius));
        }
        self.radius = radius;
        self.mass = mass_for_radius(radius);
        self.glow_radius = glow_for_radius(radius);
        Ok(())
    }

    pub fn set_velocity(&mut self, velocity: DVec2) -> Result<()> {
        ensure_finite(velocity, "velocity")?;
        self.velocity = velocity;
        Ok(())
    }

    pub fn set_position(&mut self, position: DVec2) -> Result<()> {
        ensure_finite(position, "position")?;
        self.position = position;
        Ok(())
    }

    /// Apply one discrete user adjustment. Returns false when the action was
    /// rejected (a shrink that would cross `config.min_radius`).
    pub fn apply_adjustment(&mut self, action: AdjustAction, config: &SimConfig) -> bool {
        let step = config.nudge_step;
        match action {
            AdjustAction::NudgeUp => self.velocity.y -= step,
            AdjustAction::NudgeDown => self.velocity.y += step,
            AdjustAction::NudgeLeft => self.velocity.x -= step,
            AdjustAction::NudgeRight => self.velocity.x += step,
            AdjustAction::GrowRadius => {
                return self.set_radius(self.radius + config.radius_step).is_ok();
            }
            AdjustAction::ShrinkRadius => {
                let next = self.radius - config.radius_step;
                if next < config.min_radius {
                    return false;
                }
                return self.set_radius(next).is_ok();
            }
            AdjustAction::TogglePin => self.pinned = !self.pinned,
        }
        true
    }

    /// Move the body to `to` and give it the velocity of the drag gesture.
    pub fn drag_to(&mut self, to: DVec2, previous: DVec2, fling_factor: f64) -> Result<()> {
        ensure_finite(to, "position")?;
        ensure_finite(previous, "position")?;
        let velocity = (to - previous) * fling_factor;
        ensure_finite(velocity, "velocity")?;
        self.position = to;
        self.velocity = velocity;
        Ok(())
    }

    /// Explicit Euler step under `force`. Pinned bodies do not move.
    pub(crate) fn integrate(&mut self, force: DVec2, dt_scale: f64) {
        if self.pinned {
            return;
        }
        let acceleration = force / self.mass;
        self.velocity += acceleration * dt_scale;
        self.position += self.velocity * dt_scale;
    }

    /// Append the current position, evicting the oldest points beyond `limit`.
    pub(crate) fn record_trail(&mut self, limit: usize) {
        self.trail.push_back(self.position);
        while self.trail.len() > limit {
            self.trail.pop_front();
        }
    }
}
