//! Collision debris particles.

use glam::DVec2;

use super::rng::Rng;
use crate::components::color::Rgb;

/// A short-lived decorative point. Moves in a straight line and fades out
/// over a fixed number of ticks; it never interacts with bodies or other
/// particles.
#[derive(Debug, Clone)]
pub struct ParticleEffect {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub color: Rgb,
    remaining_life: u32,
    max_life: u32,
    dead: bool,
}

impl ParticleEffect {
    pub fn new(position: DVec2, velocity: DVec2, radius: f64, color: Rgb, lifetime: u32) -> Self {
        ParticleEffect {
            position,
            velocity,
            radius,
            color,
            remaining_life: lifetime,
            max_life: lifetime,
            dead: lifetime == 0,
        }
    }

    /// One Euler step plus one tick of decay.
    pub fn tick(&mut self) {
        if self.dead {
            return;
        }
        self.position += self.velocity;
        self.remaining_life = self.remaining_life.saturating_sub(1);
        if self.remaining_life == 0 {
            self.dead = true;
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn remaining_life(&self) -> u32 {
        self.remaining_life
    }

    pub fn max_life(&self) -> u32 {
        self.max_life
    }

    /// Render opacity, fading linearly from 1 to 0 over the lifetime.
    pub fn opacity(&self) -> f64 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.remaining_life as f64 / self.max_life as f64
    }
}

/// Build `count` particles at `origin`, each heading in a uniformly random
/// direction with a speed drawn from `speed_range` and a radius from
/// `radius_range`.
pub fn spawn_batch(
    origin: DVec2,
    color: Rgb,
    count: usize,
    speed_range: (f64, f64),
    radius_range: (f64, f64),
    lifetime: u32,
    rng: &mut Rng,
) -> Vec<ParticleEffect> {
    (0..count)
        .map(|_| {
            let angle = rng.next_f64() * std::f64::consts::TAU;
            let speed = rng.range(speed_range.0, speed_range.1);
            let radius = rng.range(radius_range.0, radius_range.1);
            ParticleEffect::new(
                origin,
                DVec2::from_angle(angle) * speed,
                radius,
                color,
                lifetime,
            )
        })
        .collect()
}
