//! HUD/notification seam.
//!
//! The core reports what happened; how it is rendered (crosshair styling,
//! toasts, progress bars, completion dialogs) is entirely the sink's
//! business.

use constel_scene::NodeEntity;

/// Receiver for game-mode HUD events. All methods default to no-ops so sinks
/// implement only what they display.
pub trait HudSink {
    /// The crosshair acquired an entity (with its distance from the pilot),
    /// or lost its target (`None`).
    fn on_hover(&mut self, _entity: Option<&NodeEntity>, _distance: Option<f32>) {}

    /// Per-frame speed readout.
    fn on_speed(&mut self, _speed: f32, _boosting: bool) {}

    /// A hunt target was discovered; `discovered` of `total` found so far.
    fn on_discovery(&mut self, _entity: &NodeEntity, _discovered: usize, _total: usize) {}

    /// The hunt completed. Fired at most once per session.
    fn on_complete(&mut self, _elapsed_secs: f64, _discovered: usize) {}
}

/// Sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHud;

impl HudSink for NullHud {}
