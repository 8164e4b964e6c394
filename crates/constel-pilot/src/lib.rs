//! Pilot flight model and chase camera for Constel game mode.

mod chase_camera;
mod flight;

pub use chase_camera::{ChaseCamera, update_chase_camera};
pub use flight::{FlightFrame, PilotState, step_flight};
