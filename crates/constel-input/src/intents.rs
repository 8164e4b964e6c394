//! Boolean flight intents and the per-frame input snapshot.

/// Level-triggered flight intents, held as long as their keys are down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightIntents {
    /// Main thrust along the pilot's forward axis.
    pub forward: bool,
    /// Heavy drag applied on top of normal damping.
    pub brake: bool,
    /// Lateral thrust along the pilot's left.
    pub strafe_left: bool,
    /// Lateral thrust along the pilot's right.
    pub strafe_right: bool,
    /// Boost modifier; only effective together with `forward`.
    pub boost: bool,
}

/// One frame's worth of drained input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Intent levels at drain time.
    pub intents: FlightIntents,
    /// Accumulated, sensitivity-scaled yaw delta in radians.
    pub yaw: f32,
    /// Accumulated, sensitivity-scaled pitch delta in radians.
    pub pitch: f32,
    /// The info key was pressed since the last drain.
    pub info_requested: bool,
}
