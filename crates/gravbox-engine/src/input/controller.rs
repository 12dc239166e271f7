use glam::DVec2;
use log::{debug, warn};

use crate::api::types::{AdjustAction, BodyId, SimEvent};
use crate::core::body::BodyDesc;
use crate::core::simulation::{Simulation, TickReport};
use crate::error::SimError;
use crate::input::queue::InputEvent;

// ── DOM key codes ────────────────────────────────────────────────────

pub const KEY_SPACE: u32 = 32;
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;
pub const KEY_C: u32 = 67;
pub const KEY_D: u32 = 68;
pub const KEY_P: u32 = 80;
pub const KEY_S: u32 = 83;
pub const KEY_U: u32 = 85;
pub const KEY_X: u32 = 88;

// ── Custom command kinds from the control panel ──────────────────────

/// Create a body at (a, b).
pub const CUSTOM_CREATE_AT: u32 = 1;
/// Nudge the selection; a = 0 up, 1 down, 2 left, 3 right.
pub const CUSTOM_NUDGE: u32 = 2;
pub const CUSTOM_GROW: u32 = 3;
pub const CUSTOM_SHRINK: u32 = 4;
pub const CUSTOM_CLEAR_ALL: u32 = 5;
pub const CUSTOM_CLEAR_SELECTED: u32 = 6;
pub const CUSTOM_TOGGLE_PAUSE: u32 = 7;
pub const CUSTOM_TOGGLE_PIN: u32 = 8;

fn nudge_for(direction: f32) -> Option<AdjustAction> {
    match direction as u32 {
        0 => Some(AdjustAction::NudgeUp),
        1 => Some(AdjustAction::NudgeDown),
        2 => Some(AdjustAction::NudgeLeft),
        3 => Some(AdjustAction::NudgeRight),
        _ => None,
    }
}

fn point(x: f32, y: f32) -> DVec2 {
    DVec2::new(x as f64, y as f64)
}

/// Maps pointer, keyboard and panel input onto simulation operations.
///
/// Holds the only piece of UI state the simulation cares about: which body
/// (if any) is selected.
#[derive(Debug, Default)]
pub struct SandboxController {
    selected: Option<BodyId>,
    paused: bool,
    pointer: DVec2,
    /// Last pointer position while a press is held.
    drag_anchor: Option<DVec2>,
}

impl SandboxController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn handle(&mut self, event: &InputEvent, sim: &mut Simulation) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let p = point(x, y);
                self.pointer = p;
                self.selected = sim.pick_body_at(p);
                self.drag_anchor = Some(p);
            }
            InputEvent::PointerMove { x, y } => {
                let p = point(x, y);
                self.pointer = p;
                if let (Some(id), Some(previous)) = (self.selected, self.drag_anchor) {
                    self.report(sim.drag_body(id, p, previous));
                    self.drag_anchor = Some(p);
                }
            }
            InputEvent::PointerUp { x, y } => {
                self.pointer = point(x, y);
                self.drag_anchor = None;
            }
            InputEvent::KeyDown { key_code } => self.handle_key(key_code, sim),
            InputEvent::KeyUp { .. } => {}
            InputEvent::Custom { kind, a, b, .. } => self.handle_custom(kind, a, b, sim),
        }
    }

    fn handle_key(&mut self, key_code: u32, sim: &mut Simulation) {
        match key_code {
            KEY_SPACE => self.spawn_at(self.pointer, sim),
            KEY_P => self.paused = !self.paused,
            KEY_X => self.clear_all(sim),
            KEY_C => self.clear_selected(sim),
            KEY_UP => self.adjust(AdjustAction::NudgeUp, sim),
            KEY_DOWN => self.adjust(AdjustAction::NudgeDown, sim),
            KEY_LEFT => self.adjust(AdjustAction::NudgeLeft, sim),
            KEY_RIGHT => self.adjust(AdjustAction::NudgeRight, sim),
            KEY_U => self.adjust(AdjustAction::GrowRadius, sim),
            KEY_D => self.adjust(AdjustAction::ShrinkRadius, sim),
            KEY_S => self.adjust(AdjustAction::TogglePin, sim),
            _ => {}
        }
    }

    fn handle_custom(&mut self, kind: u32, a: f32, b: f32, sim: &mut Simulation) {
        match kind {
            CUSTOM_CREATE_AT => self.spawn_at(point(a, b), sim),
            CUSTOM_NUDGE => match nudge_for(a) {
                Some(action) => self.adjust(action, sim),
                None => warn!("nudge: unknown direction {a}"),
            },
            CUSTOM_GROW => self.adjust(AdjustAction::GrowRadius, sim),
            CUSTOM_SHRINK => self.adjust(AdjustAction::ShrinkRadius, sim),
            CUSTOM_CLEAR_ALL => self.clear_all(sim),
            CUSTOM_CLEAR_SELECTED => self.clear_selected(sim),
            CUSTOM_TOGGLE_PAUSE => self.paused = !self.paused,
            CUSTOM_TOGGLE_PIN => self.adjust(AdjustAction::TogglePin, sim),
            _ => warn!("unknown custom event kind {kind}"),
        }
    }

    fn spawn_at(&mut self, at: DVec2, sim: &mut Simulation) {
        let color = sim.random_color();
        let desc = BodyDesc::new(sim.config().spawn_radius)
            .with_position(at)
            .with_color(color);
        match sim.create_body(desc) {
            Ok(id) => {
                debug!("spawned {id:?} at ({:.0}, {:.0})", at.x, at.y);
                self.selected = Some(id);
            }
            Err(err) => warn!("spawn rejected: {err}"),
        }
    }

    fn adjust(&mut self, action: AdjustAction, sim: &mut Simulation) {
        let Some(id) = self.selected else { return };
        match sim.adjust(id, action) {
            Ok(true) => {}
            Ok(false) => debug!("{action:?} rejected for {id:?}"),
            Err(err) => self.report(Err(err)),
        }
    }

    fn clear_all(&mut self, sim: &mut Simulation) {
        sim.clear_all();
        self.selected = None;
    }

    fn clear_selected(&mut self, sim: &mut Simulation) {
        if let Some(id) = self.selected.take() {
            sim.remove_body(id);
        }
    }

    /// Log a failed operation; a stale selection is dropped.
    fn report(&mut self, result: Result<(), SimError>) {
        match result {
            Ok(()) => {}
            Err(SimError::UnknownBody(id)) => {
                debug!("selection {id:?} no longer exists");
                self.selected = None;
                self.drag_anchor = None;
            }
            Err(err) => warn!("input rejected: {err}"),
        }
    }

    /// Keep the selection on the body that absorbed the selected one.
    pub fn follow_merges(&mut self, report: &TickReport) {
        for merge in &report.merges {
            if self.selected == Some(merge.absorbed) {
                self.selected = Some(merge.survivor);
            }
        }
    }

    /// Info-box payload for the selected body, if any.
    pub fn selection_event(&self, sim: &Simulation) -> Option<SimEvent> {
        let body = sim.body(self.selected?)?;
        Some(SimEvent {
            kind: SimEvent::KIND_SELECTION,
            a: body.mass() as f32,
            b: body.velocity().length() as f32,
            c: if body.is_pinned() { 1.0 } else { 0.0 },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SimConfig;

    fn sim() -> Simulation {
        Simulation::new(SimConfig::default()).unwrap()
    }

    fn key(code: u32) -> InputEvent {
        InputEvent::KeyDown { key_code: code }
    }

    #[test]
    fn pointer_down_selects_and_clears() {
        let mut s = sim();
        let id = s.create_body(BodyDesc::new(20.0).with_position(DVec2::new(100.0, 100.0))).unwrap();
        let mut c = SandboxController::new();

        c.handle(&InputEvent::PointerDown { x: 105.0, y: 95.0 }, &mut s);
        assert_eq!(c.selected(), Some(id));

        c.handle(&InputEvent::PointerDown { x: 400.0, y: 400.0 }, &mut s);
        assert_eq!(c.selected(), None);
    }

    #[test]
    fn space_spawns_at_pointer_and_selects() {
        let mut s = sim();
        let mut c = SandboxController::new();
        c.handle(&InputEvent::PointerMove { x: 300.0, y: 200.0 }, &mut s);
        c.handle(&key(KEY_SPACE), &mut s);

        assert_eq!(s.len(), 1);
        let body = &s.bodies()[0];
        assert_eq!(c.selected(), Some(body.id()));
        assert_eq!(body.position(), DVec2::new(300.0, 200.0));
        assert_eq!(body.radius(), 25.0);
        let color = body.color();
        assert!(color.r >= 100.0 && color.g >= 100.0 && color.b >= 100.0);
    }

    #[test]
    fn keys_adjust_selected_body() {
        let mut s = sim();
        let mut c = SandboxController::new();
        c.handle(&InputEvent::Custom { kind: CUSTOM_CREATE_AT, a: 50.0, b: 50.0, c: 0.0 }, &mut s);
        let id = c.selected().unwrap();

        c.handle(&key(KEY_UP), &mut s);
        c.handle(&key(KEY_U), &mut s);
        c.handle(&key(KEY_S), &mut s);

        let body = s.body(id).unwrap();
        assert!((body.velocity().y + 0.2).abs() < 1e-12);
        assert_eq!(body.radius(), 27.0);
        assert!(body.is_pinned());
    }

    #[test]
    fn keys_without_selection_do_nothing() {
        let mut s = sim();
        let id = s.create_body(BodyDesc::new(20.0)).unwrap();
        let mut c = SandboxController::new();
        c.handle(&key(KEY_U), &mut s);
        assert_eq!(s.body(id).unwrap().radius(), 20.0);
    }

    #[test]
    fn clear_keys() {
        let mut s = sim();
        let mut c = SandboxController::new();
        c.handle(&InputEvent::Custom { kind: CUSTOM_CREATE_AT, a: 0.0, b: 0.0, c: 0.0 }, &mut s);
        c.handle(&InputEvent::Custom { kind: CUSTOM_CREATE_AT, a: 500.0, b: 0.0, c: 0.0 }, &mut s);
        assert_eq!(s.len(), 2);

        c.handle(&key(KEY_C), &mut s);
        assert_eq!(s.len(), 1);
        assert_eq!(c.selected(), None);

        c.handle(&key(KEY_X), &mut s);
        assert!(s.is_empty());
    }

    #[test]
    fn pause_toggles() {
        let mut s = sim();
        let mut c = SandboxController::new();
        c.handle(&key(KEY_P), &mut s);
        assert!(c.is_paused());
        c.handle(&InputEvent::Custom { kind: CUSTOM_TOGGLE_PAUSE, a: 0.0, b: 0.0, c: 0.0 }, &mut s);
        assert!(!c.is_paused());
    }

    #[test]
    fn drag_flings_selected_body() {
        let mut s = sim();
        let id = s.create_body(BodyDesc::new(20.0).with_position(DVec2::new(100.0, 100.0))).unwrap();
        let mut c = SandboxController::new();

        c.handle(&InputEvent::PointerDown { x: 100.0, y: 100.0 }, &mut s);
        c.handle(&InputEvent::PointerMove { x: 120.0, y: 90.0 }, &mut s);
        let body = s.body(id).unwrap();
        assert_eq!(body.position(), DVec2::new(120.0, 90.0));
        assert!((body.velocity() - DVec2::new(2.0, -1.0)).length() < 1e-12);

        c.handle(&InputEvent::PointerUp { x: 120.0, y: 90.0 }, &mut s);
        c.handle(&InputEvent::PointerMove { x: 200.0, y: 200.0 }, &mut s);
        assert_eq!(s.body(id).unwrap().position(), DVec2::new(120.0, 90.0));
    }

    #[test]
    fn selection_follows_merge_survivor() {
        let mut s = sim();
        let a = s.create_body(BodyDesc::new(25.0)).unwrap();
        let b = s.create_body(BodyDesc::new(25.0).with_position(DVec2::new(10.0, 0.0))).unwrap();
        let mut c = SandboxController::new();
        c.handle(&InputEvent::PointerDown { x: 12.0, y: 0.0 }, &mut s);
        assert_eq!(c.selected(), Some(b));

        let report = s.advance_tick(1.0);
        c.follow_merges(&report);
        assert_eq!(c.selected(), Some(a));
    }

    #[test]
    fn stale_selection_is_dropped() {
        let mut s = sim();
        let id = s.create_body(BodyDesc::new(20.0).with_position(DVec2::new(100.0, 100.0))).unwrap();
        let mut c = SandboxController::new();
        c.handle(&InputEvent::PointerDown { x: 100.0, y: 100.0 }, &mut s);
        s.remove_body(id);
        c.handle(&key(KEY_LEFT), &mut s);
        assert_eq!(c.selected(), None);
    }

    #[test]
    fn selection_event_reports_body_info() {
        let mut s = sim();
        let mut c = SandboxController::new();
        assert!(c.selection_event(&s).is_none());
        c.handle(&InputEvent::Custom { kind: CUSTOM_CREATE_AT, a: 0.0, b: 0.0, c: 0.0 }, &mut s);
        c.handle(&InputEvent::Custom { kind: CUSTOM_TOGGLE_PIN, a: 0.0, b: 0.0, c: 0.0 }, &mut s);
        let event = c.selection_event(&s).unwrap();
        assert_eq!(event.kind, SimEvent::KIND_SELECTION);
        assert_eq!(event.c, 1.0);
        assert!(event.a > 0.0);
    }
}
