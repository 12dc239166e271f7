//! Collision detection and merging.

use glam::DVec2;
use log::debug;

use crate::api::types::BodyId;
use crate::components::color::Rgb;
use crate::core::body::Body;

/// One resolved merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeEvent {
    /// Id kept by the merged body (the lower-index partner).
    pub survivor: BodyId,
    /// Id of the body that was removed.
    pub absorbed: BodyId,
    /// Collision point: the midpoint of the two centers.
    pub position: DVec2,
    /// Radius of the merged body.
    pub radius: f64,
    /// Color of the survivor before merging; used for the debris burst.
    pub color: Rgb,
}

/// Merge every overlapping pair, at most once per body.
///
/// Pairs are scanned in ascending index order. When body `i` merges with
/// body `j`, the result takes slot `i` and slot `j` is emptied; the scan then
/// moves to the next `i`. A merged body sits at an index no later scan looks
/// at as a partner, and an emptied slot is skipped, so no body takes part in
/// two merges within one pass.
pub fn resolve_merges(bodies: Vec<Body>) -> (Vec<Body>, Vec<MergeEvent>) {
    let mut slots: Vec<Option<Body>> = bodies.into_iter().map(Some).collect();
    let mut events = Vec::new();

    for i in 0..slots.len() {
        let Some(a) = &slots[i] else { continue };
        let partner = (i + 1..slots.len())
            .find(|&j| slots[j].as_ref().is_some_and(|b| a.overlaps(b)));

        if let Some(j) = partner {
            let (Some(a), Some(b)) = (slots[i].take(), slots[j].take()) else {
                continue;
            };
            let merged = Body::merged(&a, &b);
            debug!(
                "merge {:?} + {:?} -> radius {:.2} mass {:.1}",
                a.id(),
                b.id(),
                merged.radius(),
                merged.mass()
            );
            events.push(MergeEvent {
                survivor: a.id(),
                absorbed: b.id(),
                position: merged.position(),
                radius: merged.radius(),
                color: a.color(),
            });
            slots[i] = Some(merged);
        }
    }

    (slots.into_iter().flatten().collect(), events)
}
