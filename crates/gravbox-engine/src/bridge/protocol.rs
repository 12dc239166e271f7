//! Shared buffer layout between the engine and the host page.
//! Must stay in sync with the host's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 12 floats]
//! [Bodies: max_bodies × 8 floats]
//! [Trails: max_trail_vertices × 4 floats]
//! [Particles: max_particles × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written once into the header at init.
//! The host reads them from the header to compute offsets dynamically.

use crate::api::config::DEFAULT_TRAIL_LENGTH;
use crate::api::types::SimEvent;
use crate::renderer::instance::{BodyInstance, ParticleInstance, TrailVertex};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_MAX_TRAIL_VERTICES: usize = 4;
pub const HEADER_TRAIL_VERTEX_COUNT: usize = 5;
pub const HEADER_MAX_PARTICLES: usize = 6;
pub const HEADER_PARTICLE_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_PAUSED: usize = 10;
pub const HEADER_SELECTED_INDEX: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Section capacities, matching the host's allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacities {
    pub max_bodies: usize,
    pub max_trail_vertices: usize,
    pub max_particles: usize,
    pub max_events: usize,
}

impl Default for Capacities {
    /// Room for a full default-length trail behind every body.
    fn default() -> Self {
        let max_bodies = 64;
        Self {
            max_bodies,
            max_trail_vertices: max_bodies * DEFAULT_TRAIL_LENGTH,
            max_particles: 1024,
            max_events: 32,
        }
    }
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub capacities: Capacities,

    /// Offset (in floats) where body data begins.
    pub body_data_offset: usize,
    /// Offset (in floats) where trail data begins.
    pub trail_data_offset: usize,
    /// Offset (in floats) where particle data begins.
    pub particle_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(capacities: Capacities) -> Self {
        let body_data_offset = HEADER_FLOATS;
        let trail_data_offset = body_data_offset + capacities.max_bodies * BodyInstance::FLOATS;
        let particle_data_offset =
            trail_data_offset + capacities.max_trail_vertices * TrailVertex::FLOATS;
        let event_data_offset =
            particle_data_offset + capacities.max_particles * ParticleInstance::FLOATS;
        let buffer_total_floats = event_data_offset + capacities.max_events * SimEvent::FLOATS;

        Self {
            capacities,
            body_data_offset,
            trail_data_offset,
            particle_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Header with the static fields filled in; counts start at zero.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_BODIES] = self.capacities.max_bodies as f32;
        header[HEADER_MAX_TRAIL_VERTICES] = self.capacities.max_trail_vertices as f32;
        header[HEADER_MAX_PARTICLES] = self.capacities.max_particles as f32;
        header[HEADER_MAX_EVENTS] = self.capacities.max_events as f32;
        header[HEADER_SELECTED_INDEX] = -1.0;
        header
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::new(Capacities::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(Capacities {
            max_bodies: 2,
            max_trail_vertices: 3,
            max_particles: 4,
            max_events: 5,
        });
        assert_eq!(layout.body_data_offset, 12);
        assert_eq!(layout.trail_data_offset, 12 + 16);
        assert_eq!(layout.particle_data_offset, 28 + 12);
        assert_eq!(layout.event_data_offset, 40 + 32);
        assert_eq!(layout.buffer_total_floats, 72 + 20);
        assert_eq!(layout.buffer_total_bytes, 92 * 4);
    }

    #[test]
    fn header_carries_capacities() {
        let layout = ProtocolLayout::default();
        let header = layout.header();
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_MAX_BODIES], 64.0);
        assert_eq!(header[HEADER_MAX_EVENTS], 32.0);
        assert_eq!(header[HEADER_MAX_TRAIL_VERTICES], (64 * DEFAULT_TRAIL_LENGTH) as f32);
        assert_eq!(header[HEADER_BODY_COUNT], 0.0);
        assert_eq!(header[HEADER_SELECTED_INDEX], -1.0);
    }
}
