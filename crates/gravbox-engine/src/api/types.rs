use bytemuck::{Pod, Zeroable};

/// Stable identifier for a body, issued by the simulation at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// A discrete user adjustment applied to a single body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustAction {
    NudgeUp,
    NudgeDown,
    NudgeLeft,
    NudgeRight,
    GrowRadius,
    ShrinkRadius,
    TogglePin,
}

/// An event communicated from Rust to the host page after a frame.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SimEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SimEvent {
    pub const FLOATS: usize = 4;

    /// Two bodies merged at (a, b); c is the merged radius.
    pub const KIND_MERGE: f32 = 1.0;
    /// Info for the selected body: a = mass, b = speed, c = 1.0 when pinned.
    pub const KIND_SELECTION: f32 = 2.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<SimEvent>(), SimEvent::FLOATS * 4);
    }
}
