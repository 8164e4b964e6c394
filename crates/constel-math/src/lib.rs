//! Pose math, exponential smoothing, and camera projection helpers for Constel.

mod pose;
mod projection;
mod smoothing;

pub use pose::{Pose, compose_yaw_pitch, look_at};
pub use projection::project_ndc;
pub use smoothing::{approach_alpha, decay_factor};
