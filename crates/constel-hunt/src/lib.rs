//! Crosshair target acquisition and the discovery hunt for Constel game mode.

mod discovery;
mod events;
mod targeting;

pub use discovery::{HuntPhase, HuntTracker};
pub use events::{HudSink, NullHud};
pub use targeting::{CameraView, TargetAcquisition};
