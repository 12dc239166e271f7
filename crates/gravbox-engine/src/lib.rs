pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::{BurstConfig, SimConfig};
pub use api::types::{AdjustAction, BodyId, SimEvent};
pub use components::color::Rgb;
pub use core::body::{Body, BodyDesc};
pub use core::merge::MergeEvent;
pub use core::simulation::{Simulation, TickReport};
pub use core::time::FrameClock;
pub use error::{Result, SimError};
pub use input::controller::SandboxController;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{BodyInstance, ParticleInstance, RenderBuffer, TrailVertex};
pub use bridge::protocol::{Capacities, ProtocolLayout};
pub use systems::effects::{EffectsState, ParticleEffect};
pub use systems::render::build_render_buffer;
