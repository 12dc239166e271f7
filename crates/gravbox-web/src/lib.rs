//! wasm-bindgen exports for the gravbox sandbox.
//!
//! The host calls `sandbox_init` once, forwards DOM input as it arrives,
//! calls `sandbox_tick` from `requestAnimationFrame`, then reads the header
//! and the body/trail/particle/event sections through the pointer accessors.

pub mod runner;

pub use runner::SandboxRunner;

use std::cell::RefCell;

use glam::DVec2;
use gravbox_engine::{BodyDesc, InputEvent, Rgb, SimConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SandboxRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner; before `sandbox_init` this logs and yields
/// the fallback so the host reads empty sections instead of trapping.
fn with_runner<R>(fallback: R, f: impl FnOnce(&mut SandboxRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("sandbox not initialized, call sandbox_init() first");
            fallback
        }
    })
}

#[wasm_bindgen]
pub fn sandbox_init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"gravbox: logger already installed".into());
    }

    match SandboxRunner::new(SimConfig::default()) {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("gravbox: initialized");
        }
        Err(err) => log::error!("gravbox: init failed: {err}"),
    }
}

/// `dt` is the wall-clock frame delta in seconds.
#[wasm_bindgen]
pub fn sandbox_tick(dt: f64) {
    with_runner((), |r| r.tick(dt));
}

#[wasm_bindgen]
pub fn sandbox_load_config(json: &str) -> bool {
    with_runner(false, |r| match r.load_config(json) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("config rejected: {err}");
            false
        }
    })
}

/// Create a body directly. Returns its id, or -1 when rejected.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn sandbox_create_body(
    mass: f64,
    radius: f64,
    r: f64,
    g: f64,
    b: f64,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
) -> f64 {
    let color = match Rgb::new(r, g, b) {
        Ok(color) => color,
        Err(err) => {
            log::warn!("create_body rejected: {err}");
            return -1.0;
        }
    };
    let desc = BodyDesc::new(radius)
        .with_color(color)
        .with_position(DVec2::new(x, y))
        .with_velocity(DVec2::new(vx, vy));

    with_runner(-1.0, |runner| match runner.create_body(mass, desc) {
        Ok(id) => id as f64,
        Err(err) => {
            log::warn!("create_body rejected: {err}");
            -1.0
        }
    })
}

// ---- Input ----

#[wasm_bindgen]
pub fn sandbox_pointer_down(x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn sandbox_pointer_up(x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn sandbox_pointer_move(x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn sandbox_key_down(key_code: u32) {
    with_runner((), |r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn sandbox_key_up(key_code: u32) {
    with_runner((), |r| r.push_input(InputEvent::KeyUp { key_code }));
}

#[wasm_bindgen]
pub fn sandbox_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner((), |r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

// ---- Data accessors ----

/// Copy of the 12-float header.
#[wasm_bindgen]
pub fn get_header() -> js_sys::Float32Array {
    with_runner(js_sys::Float32Array::new_with_length(0), |r| {
        js_sys::Float32Array::from(&r.header()[..])
    })
}

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.header_ptr())
}

#[wasm_bindgen]
pub fn get_bodies_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.bodies_ptr())
}

#[wasm_bindgen]
pub fn get_body_count() -> u32 {
    with_runner(0, |r| r.body_count())
}

#[wasm_bindgen]
pub fn get_trails_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.trails_ptr())
}

#[wasm_bindgen]
pub fn get_trail_vertex_count() -> u32 {
    with_runner(0, |r| r.trail_vertex_count())
}

#[wasm_bindgen]
pub fn get_particles_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.particles_ptr())
}

#[wasm_bindgen]
pub fn get_particle_count() -> u32 {
    with_runner(0, |r| r.particle_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_runner(0, |r| r.event_count())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_bodies() -> u32 {
    with_runner(0, |r| r.layout().capacities.max_bodies as u32)
}

#[wasm_bindgen]
pub fn get_max_trail_vertices() -> u32 {
    with_runner(0, |r| r.layout().capacities.max_trail_vertices as u32)
}

#[wasm_bindgen]
pub fn get_max_particles() -> u32 {
    with_runner(0, |r| r.layout().capacities.max_particles as u32)
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(0, |r| r.layout().capacities.max_events as u32)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(0, |r| r.buffer_total_floats())
}
