//! Game-mode session lifecycle for Constel.
//!
//! [`GameSession`] owns the per-frame orchestration: input drain, flight
//! step, chase camera, crosshair acquisition, and discovery hunt, in that
//! fixed order, with a single writer for every piece of state. It also owns
//! the mode-switch choreography: explore-camera snapshots on the way in,
//! saved pilot/camera state on the way out, so re-entering game mode resumes
//! exactly where the pilot left off.

mod session;


pub use session::{
    ExploreSnapshot, FrameResult, GameSession, SceneData, MAX_FRAME_DT,
};
