use std::ops::Range;

use glam::DVec2;
use log::{info, warn};

use crate::api::config::SimConfig;
use crate::api::types::{AdjustAction, BodyId};
use crate::components::color::Rgb;
use crate::core::body::{Body, BodyDesc};
use crate::core::gravity;
use crate::core::merge::{self, MergeEvent};
use crate::error::{Result, SimError};
use crate::systems::effects::{EffectsState, ParticleEffect};

/// What happened during one `advance_tick`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Merges resolved this tick, in resolution order.
    pub merges: Vec<MergeEvent>,
    /// Index range of particles spawned this tick within `Simulation::particles()`.
    pub spawned: Range<usize>,
}

/// The whole sandbox state: bodies, live particles and parameters.
///
/// Body order is stable (insertion order, with merged bodies taking the slot
/// of their lower-index partner) and is the only thing merge resolution
/// depends on.
pub struct Simulation {
    bodies: Vec<Body>,
    effects: EffectsState,
    config: SimConfig,
    next_id: u32,
    ticks: u64,
}

impl Simulation {
    /// Create an empty simulation after validating `config`.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            bodies: Vec::with_capacity(64),
            effects: EffectsState::new(config.seed),
            config,
            next_id: 1,
            ticks: 0,
        })
    }

    /// Simulation pre-populated with the three starter bodies.
    pub fn with_default_scene(config: SimConfig) -> Result<Self> {
        let mut sim = Self::new(config)?;
        let starters = [
            ((150.0, 400.0), (0.0, 1.0), (0.0, 0.0, 100.0)),
            ((1100.0, 400.0), (0.0, -1.0), (0.0, 100.0, 0.0)),
            ((400.0, 600.0), (0.5, -0.5), (200.0, 0.0, 0.0)),
        ];
        for ((x, y), (vx, vy), (r, g, b)) in starters {
            sim.create_body(
                BodyDesc::new(25.0)
                    .with_position(DVec2::new(x, y))
                    .with_velocity(DVec2::new(vx, vy))
                    .with_color(Rgb::new(r, g, b)?),
            )?;
        }
        info!("default scene: {} bodies", sim.len());
        Ok(sim)
    }

    /// Validate `desc` and add the body at the end of the collection.
    /// Ids are never reused; a rejected body does not consume one.
    pub fn create_body(&mut self, desc: BodyDesc) -> Result<BodyId> {
        let id = BodyId(self.next_id);
        let next = self.next_id.checked_add(1).ok_or(SimError::IdsExhausted)?;
        let body = Body::from_desc(id, &desc)?;
        self.next_id = next;
        self.bodies.push(body);
        Ok(id)
    }

    /// Remove a body, keeping the order of the rest.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.bodies.iter().position(|b| b.id() == id)?;
        Some(self.bodies.remove(idx))
    }

    /// Remove every body. Live particles keep fading out.
    pub fn clear_all(&mut self) {
        self.bodies.clear();
    }

    /// Hit test. When bodies overlap the point, the last one (drawn on top) wins.
    pub fn pick_body_at(&self, point: DVec2) -> Option<BodyId> {
        self.bodies.iter().rev().find(|b| b.contains(point)).map(Body::id)
    }

    /// Apply a user adjustment to one body. `Ok(false)` means the action was
    /// a rejected no-op (shrinking below the radius floor).
    pub fn adjust(&mut self, id: BodyId, action: AdjustAction) -> Result<bool> {
        let config = &self.config;
        let body = self
            .bodies
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or(SimError::UnknownBody(id))?;
        Ok(body.apply_adjustment(action, config))
    }

    /// Drag a body to `to`; its new velocity follows the gesture from `previous`.
    pub fn drag_body(&mut self, id: BodyId, to: DVec2, previous: DVec2) -> Result<()> {
        let fling = self.config.fling_factor;
        self.body_mut(id)?.drag_to(to, previous, fling)
    }

    /// Advance the simulation by one frame.
    ///
    /// Order: fade existing particles, compute every force from one snapshot,
    /// integrate, extend trails, then merge overlapping pairs and spawn a
    /// debris burst per merge.
    pub fn advance_tick(&mut self, dt_scale: f64) -> TickReport {
        if !dt_scale.is_finite() || dt_scale < 0.0 {
            warn!("advance_tick: ignoring invalid dt_scale {dt_scale}");
            return TickReport::default();
        }

        self.effects.tick();

        let forces = gravity::net_forces(&self.bodies, &self.config);
        for (body, force) in self.bodies.iter_mut().zip(forces) {
            body.integrate(force, dt_scale);
            body.record_trail(self.config.trail_length);
        }

        let (bodies, merges) = merge::resolve_merges(std::mem::take(&mut self.bodies));
        self.bodies = bodies;

        let start = self.effects.len();
        for event in &merges {
            self.effects.spawn_burst(event.position, event.color, &self.config.burst);
        }

        self.ticks += 1;
        TickReport {
            merges,
            spawned: start..self.effects.len(),
        }
    }

    /// Random light color from the simulation's RNG, for newly placed bodies.
    pub fn random_color(&mut self) -> Rgb {
        Rgb::random_pastel(&mut self.effects.rng)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut Body> {
        self.bodies
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or(SimError::UnknownBody(id))
    }

    pub fn particles(&self) -> &[ParticleEffect] {
        self.effects.particles()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Ticks advanced since creation.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
