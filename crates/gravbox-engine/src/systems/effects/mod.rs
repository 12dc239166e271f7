//! Visual effects: collision debris particles.
//!
//! `EffectsState` owns the live particles and the RNG that scatters them.
//! Particles are purely decorative; nothing in the body simulation reads them.

mod rng;
mod particle;

pub use rng::Rng;
pub use particle::{spawn_batch, ParticleEffect};

use std::ops::Range;

use glam::DVec2;

use crate::api::config::BurstConfig;
use crate::components::color::Rgb;

/// Container for all live particle effects.
pub struct EffectsState {
    particles: Vec<ParticleEffect>,
    pub rng: Rng,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        EffectsState {
            particles: Vec::with_capacity(256),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Spawn one collision burst. Returns the index range of the new
    /// particles in `particles()`.
    pub fn spawn_burst(&mut self, origin: DVec2, color: Rgb, burst: &BurstConfig) -> Range<usize> {
        let start = self.particles.len();
        let batch = spawn_batch(
            origin,
            color,
            burst.count,
            burst.speed,
            burst.radius,
            burst.lifetime,
            &mut self.rng,
        );
        self.particles.extend(batch);
        start..self.particles.len()
    }

    /// Advance every particle one tick and drop the dead ones.
    pub fn tick(&mut self) {
        for p in &mut self.particles {
            p.tick();
        }
        self.particles.retain(ParticleEffect::is_alive);
    }

    pub fn particles(&self) -> &[ParticleEffect] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_burst_reports_range() {
        let mut effects = EffectsState::new(42);
        let burst = BurstConfig::default();
        let first = effects.spawn_burst(DVec2::ZERO, Rgb::WHITE, &burst);
        let second = effects.spawn_burst(DVec2::ONE, Rgb::WHITE, &burst);
        assert_eq!(first, 0..30);
        assert_eq!(second, 30..60);
        assert_eq!(effects.len(), 60);
    }

    #[test]
    fn tick_culls_expired_particles() {
        let mut effects = EffectsState::new(42);
        let burst = BurstConfig { lifetime: 3, ..Default::default() };
        effects.spawn_burst(DVec2::ZERO, Rgb::WHITE, &burst);
        effects.tick();
        effects.tick();
        assert_eq!(effects.len(), 30);
        effects.tick();
        assert!(effects.is_empty());
    }

    #[test]
    fn same_seed_same_debris() {
        let burst = BurstConfig::default();
        let mut a = EffectsState::new(9);
        let mut b = EffectsState::new(9);
        a.spawn_burst(DVec2::ZERO, Rgb::WHITE, &burst);
        b.spawn_burst(DVec2::ZERO, Rgb::WHITE, &burst);
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.velocity, pb.velocity);
        }
    }
}
