//! Configuration system for Constel.
//!
//! Provides runtime-configurable tuning for every game-mode subsystem,
//! persisted to disk as RON files with forward/backward compatible
//! serialization (missing fields fall back to defaults).

mod config;
mod error;

pub use config::{
    CameraConfig, DebugConfig, FlightConfig, GameConfig, HuntConfig, InputConfig, TargetingConfig,
};
pub use error::ConfigError;
