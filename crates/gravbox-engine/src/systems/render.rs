use crate::api::types::BodyId;
use crate::core::simulation::Simulation;
use crate::renderer::instance::{BodyInstance, ParticleInstance, RenderBuffer, TrailVertex};

/// Peak opacity of the newest trail dot.
const TRAIL_MAX_ALPHA: f32 = 0.5;

/// Rebuild all render sections from the current simulation state.
///
/// Sections are truncated at the buffer's `max_*` limits, which match the
/// space the host reserved for them. The trail section is split evenly
/// across drawn bodies; a body over its share keeps its newest dots.
pub fn build_render_buffer(sim: &Simulation, selected: Option<BodyId>, buffer: &mut RenderBuffer) {
    buffer.clear();
    let max_bodies = buffer.max_bodies;
    let max_trails = buffer.max_trail_vertices;
    let max_particles = buffer.max_particles;

    let drawn = sim.len().min(max_bodies);
    let trail_share = if drawn == 0 { 0 } else { (max_trails / drawn).max(1) };

    for (index, body) in sim.bodies().iter().take(max_bodies).enumerate() {
        let mut flags = 0;
        if body.is_pinned() {
            flags |= BodyInstance::FLAG_PINNED;
        }
        if selected == Some(body.id()) {
            flags |= BodyInstance::FLAG_SELECTED;
        }
        let [r, g, b] = body.color().to_unit();
        let pos = body.position().as_vec2();
        buffer.bodies.push(BodyInstance {
            x: pos.x,
            y: pos.y,
            radius: body.radius() as f32,
            glow_radius: body.glow_radius() as f32,
            r,
            g,
            b,
            flags: flags as f32,
        });

        let len = body.trail_len();
        let skip = len.saturating_sub(trail_share);
        for (i, dot) in body.trail().enumerate().skip(skip) {
            if buffer.trails.len() == max_trails {
                break;
            }
            let dot = dot.as_vec2();
            buffer.trails.push(TrailVertex {
                x: dot.x,
                y: dot.y,
                alpha: i as f32 / len as f32 * TRAIL_MAX_ALPHA,
                body_index: index as f32,
            });
        }
    }

    for p in sim.particles().iter().take(max_particles) {
        let [r, g, b] = p.color.to_unit();
        let pos = p.position.as_vec2();
        buffer.particles.push(ParticleInstance {
            x: pos.x,
            y: pos.y,
            radius: p.radius as f32,
            alpha: p.opacity() as f32,
            r,
            g,
            b,
            _pad: 0.0,
        });
    }
}
