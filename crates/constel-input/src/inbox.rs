//! Frame-coherent input inbox.
//!
//! [`InputInbox`] accumulates winit keyboard events and raw pointer motion
//! between frames and hands the whole batch to the simulation in one
//! [`drain`](InputInbox::drain) call. Pointer deltas only accumulate while
//! capture is active, mirroring pointer-lock behavior.

use constel_config::InputConfig;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::intents::{FlightIntents, FrameInput};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is a repeat event.
    pub repeat: bool,
}

/// Accumulates input between frames; drained exactly once per frame.
///
/// # Usage
///
/// 1. Forward winit events via [`process_key_event`](Self::process_key_event)
///    and [`on_pointer_motion`](Self::on_pointer_motion).
/// 2. Call [`drain`](Self::drain) once per frame from the simulation step.
#[derive(Debug, Clone)]
pub struct InputInbox {
    intents: FlightIntents,
    pending_yaw: f32,
    pending_pitch: f32,
    info_requested: bool,
    captured: bool,
    mouse_sensitivity: f32,
    invert_pitch: bool,
}

impl InputInbox {
    /// Creates an empty inbox with the given input tuning.
    #[must_use]
    pub fn new(config: &InputConfig) -> Self {
        Self {
            intents: FlightIntents::default(),
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            info_requested: false,
            captured: false,
            mouse_sensitivity: config.mouse_sensitivity,
            invert_pitch: config.invert_pitch,
        }
    }

    // ── Event handlers ──────────────────────────────────────────────

    /// Process a winit [`KeyEvent`], updating intent levels.
    pub fn process_key_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Process a [`RawKeyEvent`] (platform-independent, test-friendly).
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        let down = event.state == ElementState::Pressed;
        match event.key {
            PhysicalKey::Code(KeyCode::KeyW) => self.intents.forward = down,
            PhysicalKey::Code(KeyCode::KeyS) => self.intents.brake = down,
            PhysicalKey::Code(KeyCode::KeyA) => self.intents.strafe_left = down,
            PhysicalKey::Code(KeyCode::KeyD) => self.intents.strafe_right = down,
            PhysicalKey::Code(KeyCode::ShiftLeft) | PhysicalKey::Code(KeyCode::ShiftRight) => {
                self.intents.boost = down;
            }
            PhysicalKey::Code(KeyCode::Space) => {
                if down {
                    self.info_requested = true;
                }
            }
            _ => {}
        }
    }

    /// Accumulate a raw pointer motion delta in pixels.
    ///
    /// Ignored while capture is inactive. Horizontal motion turns the nose
    /// away from the drag direction; vertical motion pitches.
    pub fn on_pointer_motion(&mut self, dx: f64, dy: f64) {
        if !self.captured {
            return;
        }
        self.pending_yaw -= dx as f32 * self.mouse_sensitivity;
        let pitch = dy as f32 * self.mouse_sensitivity;
        self.pending_pitch += if self.invert_pitch { -pitch } else { pitch };
    }

    /// Set pointer capture state. While not captured, motion is discarded.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Whether pointer capture is currently active.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Current intent levels without draining.
    #[must_use]
    pub fn intents(&self) -> FlightIntents {
        self.intents
    }

    /// Take the accumulated input for this frame and reset the transients.
    ///
    /// Pointer deltas and the info request reset to zero; intent levels
    /// persist because keys stay held across frames.
    pub fn drain(&mut self) -> FrameInput {
        let frame = FrameInput {
            intents: self.intents,
            yaw: self.pending_yaw,
            pitch: self.pending_pitch,
            info_requested: self.info_requested,
        };
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.info_requested = false;
        frame
    }

    /// Release all intents, e.g. when the window loses focus while keys are
    /// held (no release events will arrive).
    pub fn release_all(&mut self) {
        self.intents = FlightIntents::default();
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.info_requested = false;
    }
}
