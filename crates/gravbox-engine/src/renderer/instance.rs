use bytemuck::{Pod, Zeroable};

use crate::bridge::protocol::Capacities;

/// Per-body render data read by the host renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Outer radius of the glow halo.
    pub glow_radius: f32,
    /// Color channels normalised to [0, 1].
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Bit flags, see `FLAG_PINNED` / `FLAG_SELECTED`.
    pub flags: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const FLAG_PINNED: u32 = 1;
    pub const FLAG_SELECTED: u32 = 2;
}

/// One trail dot. 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub x: f32,
    pub y: f32,
    /// Oldest dots are the most transparent.
    pub alpha: f32,
    /// Index of the owning body in the body section (drawn in its color).
    pub body_index: f32,
}

impl TrailVertex {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One collision particle. 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// remaining_life / max_life.
    pub alpha: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub _pad: f32,
}

impl ParticleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Flat per-frame buffers the host reads through raw pointers.
/// Each section holds at most its `max_*` entries.
pub struct RenderBuffer {
    pub bodies: Vec<BodyInstance>,
    pub trails: Vec<TrailVertex>,
    pub particles: Vec<ParticleInstance>,
    pub max_bodies: usize,
    pub max_trail_vertices: usize,
    pub max_particles: usize,
}

impl RenderBuffer {
    /// Buffers sized to the default protocol capacities.
    pub fn new() -> Self {
        Self::for_capacities(&Capacities::default())
    }

    pub fn for_capacities(capacities: &Capacities) -> Self {
        Self::with_capacity(
            capacities.max_bodies,
            capacities.max_trail_vertices,
            capacities.max_particles,
        )
    }

    pub fn with_capacity(max_bodies: usize, max_trail_vertices: usize, max_particles: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(max_bodies),
            trails: Vec::with_capacity(max_trail_vertices),
            particles: Vec::with_capacity(max_particles),
            max_bodies,
            max_trail_vertices,
            max_particles,
        }
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.trails.clear();
        self.particles.clear();
    }

    pub fn body_count(&self) -> u32 {
        self.bodies.len() as u32
    }

    pub fn trail_vertex_count(&self) -> u32 {
        self.trails.len() as u32
    }

    pub fn particle_count(&self) -> u32 {
        self.particles.len() as u32
    }

    /// Raw pointer to body data for host reads.
    pub fn bodies_ptr(&self) -> *const f32 {
        self.bodies.as_ptr() as *const f32
    }

    pub fn trails_ptr(&self) -> *const f32 {
        self.trails.as_ptr() as *const f32
    }

    pub fn particles_ptr(&self) -> *const f32 {
        self.particles.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_strides() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), BodyInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<TrailVertex>(), TrailVertex::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<ParticleInstance>(), ParticleInstance::STRIDE_BYTES);
    }

    #[test]
    fn body_instance_casts_to_floats() {
        let inst = BodyInstance { x: 1.0, y: 2.0, radius: 3.0, ..Default::default() };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&inst));
        assert_eq!(&floats[..3], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn default_limits_match_protocol() {
        let buf = RenderBuffer::new();
        let caps = Capacities::default();
        assert_eq!(buf.max_bodies, caps.max_bodies);
        assert_eq!(buf.max_trail_vertices, caps.max_trail_vertices);
        assert_eq!(buf.max_particles, caps.max_particles);
    }

    #[test]
    fn clear_resets_counts() {
        let mut buf = RenderBuffer::new();
        buf.bodies.push(BodyInstance::default());
        buf.trails.push(TrailVertex::default());
        buf.particles.push(ParticleInstance::default());
        assert_eq!(buf.body_count(), 1);
        buf.clear();
        assert_eq!(buf.body_count(), 0);
        assert_eq!(buf.trail_vertex_count(), 0);
        assert_eq!(buf.particle_count(), 0);
    }
}
