use gravbox_engine::bridge::protocol::{
    HEADER_BODY_COUNT, HEADER_EVENT_COUNT, HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_PAUSED,
    HEADER_PARTICLE_COUNT, HEADER_SELECTED_INDEX, HEADER_TRAIL_VERTEX_COUNT,
};
use gravbox_engine::{
    build_render_buffer, BodyDesc, Capacities, FrameClock, InputEvent, InputQueue, ProtocolLayout,
    RenderBuffer, Result, SandboxController, SimConfig, SimError, SimEvent, Simulation,
};

/// Wires the simulation, the input controller and the render buffers into
/// one frame loop.
///
/// The wasm exports in `lib.rs` keep a single runner in a `thread_local!`;
/// everything here is plain Rust and testable natively.
pub struct SandboxRunner {
    sim: Simulation,
    controller: SandboxController,
    input: InputQueue,
    render_buffer: RenderBuffer,
    clock: FrameClock,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    events: Vec<SimEvent>,
    frame: u32,
}

impl SandboxRunner {
    /// Runner over the default starter scene.
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::with_capacities(config, Capacities::default())
    }

    pub fn with_capacities(config: SimConfig, capacities: Capacities) -> Result<Self> {
        let clock = FrameClock::new(config.max_dt_scale);
        let sim = Simulation::with_default_scene(config)?;
        let layout = ProtocolLayout::new(capacities);
        let header = layout.header();

        Ok(Self {
            sim,
            controller: SandboxController::new(),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(
                capacities.max_bodies,
                capacities.max_trail_vertices,
                capacities.max_particles,
            ),
            clock,
            layout,
            header,
            events: Vec::with_capacity(capacities.max_events),
            frame: 0,
        })
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply input, advance unless paused, rebuild buffers.
    pub fn tick(&mut self, frame_dt: f64) {
        self.events.clear();

        for event in self.input.drain() {
            self.controller.handle(&event, &mut self.sim);
        }

        if !self.controller.is_paused() {
            let dt_scale = self.clock.scale_for(frame_dt);
            let report = self.sim.advance_tick(dt_scale);
            self.controller.follow_merges(&report);
            for merge in &report.merges {
                self.push_event(SimEvent {
                    kind: SimEvent::KIND_MERGE,
                    a: merge.position.x as f32,
                    b: merge.position.y as f32,
                    c: merge.radius as f32,
                });
            }
        }

        if let Some(event) = self.controller.selection_event(&self.sim) {
            self.push_event(event);
        }

        build_render_buffer(&self.sim, self.controller.selected(), &mut self.render_buffer);
        self.frame = self.frame.wrapping_add(1);
        self.write_header();
    }

    fn push_event(&mut self, event: SimEvent) {
        if self.events.len() < self.layout.capacities.max_events {
            self.events.push(event);
        }
    }

    fn write_header(&mut self) {
        let selected_index = self
            .controller
            .selected()
            .and_then(|id| self.sim.bodies().iter().position(|b| b.id() == id))
            .map_or(-1.0, |i| i as f32);

        self.header[HEADER_FRAME_COUNTER] = self.frame as f32;
        self.header[HEADER_BODY_COUNT] = self.render_buffer.body_count() as f32;
        self.header[HEADER_TRAIL_VERTEX_COUNT] = self.render_buffer.trail_vertex_count() as f32;
        self.header[HEADER_PARTICLE_COUNT] = self.render_buffer.particle_count() as f32;
        self.header[HEADER_EVENT_COUNT] = self.events.len() as f32;
        self.header[HEADER_PAUSED] = if self.controller.is_paused() { 1.0 } else { 0.0 };
        self.header[HEADER_SELECTED_INDEX] = selected_index;
    }

    /// Replace the scene with a fresh default scene under a JSON config.
    /// On error the current scene keeps running untouched.
    pub fn load_config(&mut self, json: &str) -> Result<()> {
        let config = SimConfig::from_json(json)?;
        self.clock = FrameClock::new(config.max_dt_scale);
        self.sim = Simulation::with_default_scene(config)?;
        self.controller = SandboxController::new();
        self.input.drain();
        self.events.clear();
        Ok(())
    }

    /// Direct body creation for hosts that bypass the controller.
    /// `mass` is validated but not used: mass always follows from the radius.
    pub fn create_body(&mut self, mass: f64, desc: BodyDesc) -> Result<u32> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::InvalidMass(mass));
        }
        Ok(self.sim.create_body(desc)?.0)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn controller(&self) -> &SandboxController {
        &self.controller
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    // ---- Pointer accessors for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn bodies_ptr(&self) -> *const f32 {
        self.render_buffer.bodies_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.render_buffer.body_count()
    }

    pub fn trails_ptr(&self) -> *const f32 {
        self.render_buffer.trails_ptr()
    }

    pub fn trail_vertex_count(&self) -> u32 {
        self.render_buffer.trail_vertex_count()
    }

    pub fn particles_ptr(&self) -> *const f32 {
        self.render_buffer.particles_ptr()
    }

    pub fn particle_count(&self) -> u32 {
        self.render_buffer.particle_count()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn event_count(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravbox_engine::bridge::protocol::HEADER_MAX_BODIES;
    use gravbox_engine::input::controller::{CUSTOM_CREATE_AT, KEY_P, KEY_SPACE};

    const FRAME: f64 = 1.0 / 60.0;

    fn runner() -> SandboxRunner {
        SandboxRunner::new(SimConfig::default()).unwrap()
    }

    #[test]
    fn starts_with_default_scene() {
        let mut r = runner();
        r.tick(FRAME);
        assert_eq!(r.body_count(), 3);
        assert_eq!(r.header()[HEADER_BODY_COUNT], 3.0);
        assert_eq!(r.header()[HEADER_MAX_BODIES], 64.0);
        assert_eq!(r.header()[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(r.trail_vertex_count(), 3);
    }

    #[test]
    fn input_is_applied_before_the_step() {
        let mut r = runner();
        r.push_input(InputEvent::PointerMove { x: 700.0, y: 100.0 });
        r.push_input(InputEvent::KeyDown { key_code: KEY_SPACE });
        r.tick(FRAME);
        assert_eq!(r.simulation().len(), 4);
        assert!(r.controller().selected().is_some());
        assert_eq!(r.header()[HEADER_SELECTED_INDEX], 3.0);
        assert_eq!(r.event_count(), 1);
        assert_eq!(r.events()[0].kind, SimEvent::KIND_SELECTION);
    }

    #[test]
    fn paused_runner_does_not_advance() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown { key_code: KEY_P });
        r.tick(FRAME);
        let before: Vec<_> = r.simulation().bodies().iter().map(|b| b.position()).collect();
        r.tick(FRAME);
        let after: Vec<_> = r.simulation().bodies().iter().map(|b| b.position()).collect();
        assert_eq!(before, after);
        assert_eq!(r.simulation().tick_count(), 0);
        assert_eq!(r.header()[HEADER_PAUSED], 1.0);
    }

    #[test]
    fn merge_emits_event_and_particles() {
        let mut r = runner();
        r.push_input(InputEvent::Custom { kind: CUSTOM_CREATE_AT, a: 700.0, b: 100.0, c: 0.0 });
        r.push_input(InputEvent::Custom { kind: CUSTOM_CREATE_AT, a: 710.0, b: 100.0, c: 0.0 });
        r.tick(FRAME);

        assert_eq!(r.simulation().len(), 4);
        assert_eq!(r.particle_count(), 30);
        assert_eq!(r.events()[0].kind, SimEvent::KIND_MERGE);
        assert_eq!(r.header()[HEADER_EVENT_COUNT], r.event_count() as f32);
    }

    #[test]
    fn load_config_replaces_scene() {
        let mut r = runner();
        r.push_input(InputEvent::Custom { kind: CUSTOM_CREATE_AT, a: 700.0, b: 100.0, c: 0.0 });
        r.tick(FRAME);
        assert_eq!(r.simulation().len(), 4);

        r.load_config(r#"{"spawn_radius": 40.0}"#).unwrap();
        assert_eq!(r.simulation().len(), 3);
        assert_eq!(r.simulation().config().spawn_radius, 40.0);
        assert!(r.controller().selected().is_none());
    }

    #[test]
    fn bad_config_keeps_current_scene() {
        let mut r = runner();
        r.tick(FRAME);
        assert!(r.load_config("{ not json").is_err());
        assert!(r.load_config(r#"{"gravity": -1.0}"#).is_err());
        assert_eq!(r.simulation().tick_count(), 1);
    }

    #[test]
    fn create_body_validates_mass() {
        let mut r = runner();
        assert!(r.create_body(0.0, BodyDesc::new(10.0)).is_err());
        assert!(r.create_body(f64::NAN, BodyDesc::new(10.0)).is_err());
        assert!(r.create_body(100.0, BodyDesc::new(10.0)).is_ok());
    }
}
