//! Pairwise Newtonian attraction, O(n²).

use glam::DVec2;

use crate::api::config::SimConfig;
use crate::core::body::Body;

/// Smallest scaled distance ever used in the inverse-square law.
const MIN_DISTANCE: f64 = 1e-6;

/// Force exerted on `body` by `other`.
///
/// The center offset is divided by `distance_scale` before the
/// inverse-square law, and the result by `force_damping`. The distance is
/// floored at the scaled radius sum, so overlapping or coincident bodies
/// produce a bounded force; exactly coincident centers have no direction and
/// contribute nothing.
pub fn pair_force(body: &Body, other: &Body, config: &SimConfig) -> DVec2 {
    let delta = (other.position() - body.position()) / config.distance_scale;
    let floor = ((body.radius() + other.radius()) / config.distance_scale).max(MIN_DISTANCE);
    let dist = delta.length().max(floor);
    let magnitude = config.gravity * body.mass() * other.mass() / (dist * dist);
    delta.normalize_or_zero() * magnitude / config.force_damping
}

/// Net force on every body from all the others, computed from one snapshot
/// of positions. Pinned bodies get `ZERO`; they still attract the rest.
pub fn net_forces(bodies: &[Body], config: &SimConfig) -> Vec<DVec2> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            if body.is_pinned() {
                return DVec2::ZERO;
            }
            bodies
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(DVec2::ZERO, |acc, (_, other)| acc + pair_force(body, other, config))
        })
        .collect()
}
