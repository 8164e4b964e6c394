//! Tuning structs with game-feel defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level game-mode configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Flight model tuning.
    pub flight: FlightConfig,
    /// Chase camera tuning.
    pub camera: CameraConfig,
    /// Crosshair target acquisition tuning.
    pub targeting: TargetingConfig,
    /// Discovery hunt tuning.
    pub hunt: HuntConfig,
    /// Pointer/keyboard input tuning.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Flight model tuning.
///
/// The defaults are hand-tuned for an arcade feel: thrust wins quickly,
/// damping bleeds speed once the key is released, and boost trades damping
/// for top speed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    /// Base thrust acceleration in units/s².
    pub thrust_accel: f32,
    /// Base speed cap in units/s.
    pub max_speed: f32,
    /// Thrust multiplier while boosting.
    pub boost_thrust_multiplier: f32,
    /// Speed-cap multiplier while boosting.
    pub boost_speed_multiplier: f32,
    /// Damping multiplier while boosting (< 1 keeps boost snappy).
    pub boost_damping_multiplier: f32,
    /// Strafe thrust as a fraction of forward thrust.
    pub strafe_factor: f32,
    /// Extra damping multiplier while braking.
    pub brake_drag: f32,
    /// Linear damping rate in 1/s.
    pub linear_damping: f32,
    /// Angular damping rate in 1/s, shared by yaw and pitch.
    pub angular_damping: f32,
    /// Accumulated pointer yaw to angular-velocity gain.
    pub yaw_gain: f32,
    /// Accumulated pointer pitch to angular-velocity gain.
    pub pitch_gain: f32,
    /// Optional hard limit on accumulated pitch in radians. `None` allows
    /// full loops.
    pub pitch_limit: Option<f32>,
    /// Fraction of the boundary radius where the soft push begins.
    pub boundary_start_factor: f32,
    /// Peak inward boundary acceleration in units/s².
    pub boundary_push_strength: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            thrust_accel: 45.0,
            max_speed: 85.0,
            boost_thrust_multiplier: 3.5,
            boost_speed_multiplier: 3.0,
            boost_damping_multiplier: 0.55,
            strafe_factor: 0.75,
            brake_drag: 6.0,
            linear_damping: 1.2,
            angular_damping: 4.0,
            yaw_gain: 5.0,
            pitch_gain: 3.0,
            pitch_limit: None,
            boundary_start_factor: 0.9,
            boundary_push_strength: 40.0,
        }
    }
}

/// Chase camera tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Offset from the pilot to the look-at point.
    pub target_offset: [f32; 3],
    /// Lateral follow offset along the camera right axis.
    pub follow_lateral: f32,
    /// Vertical follow offset along the blended up axis.
    pub follow_height: f32,
    /// Base follow distance behind the pilot.
    pub follow_distance: f32,
    /// Extra follow distance at full speed.
    pub dynamic_distance_boost: f32,
    /// Look-ahead distance at full speed.
    pub look_ahead: f32,
    /// Blend factor between world up and pilot up (0 = no camera roll).
    pub roll_blend: f32,
    /// Base vertical field of view in degrees.
    pub base_fov_deg: f32,
    /// Extra field of view at full speed, in degrees.
    pub fov_boost_deg: f32,
    /// Remaining FOV error fraction after one second of smoothing.
    pub fov_smoothing_base: f32,
    /// Fraction of the FOV boost applied at full boundary pressure.
    pub boundary_fov_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target_offset: [0.0, 1.2, 0.0],
            follow_lateral: 0.0,
            follow_height: 0.9,
            follow_distance: 3.0,
            dynamic_distance_boost: 1.2,
            look_ahead: 2.2,
            roll_blend: 0.35,
            base_fov_deg: 60.0,
            fov_boost_deg: 16.0,
            fov_smoothing_base: 1e-4,
            boundary_fov_factor: 0.35,
        }
    }
}

/// Crosshair target acquisition tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TargetingConfig {
    /// Maximum camera-to-entity distance considered by the fallback scan.
    pub max_detection_distance: f32,
    /// Maximum angular offset from the view axis, in radians.
    pub max_angle_rad: f32,
    /// Screen-space tolerance window around the crosshair, in NDC units.
    pub ndc_tolerance: f32,
    /// Fallback score weight on angular offset. Angle dominates.
    pub angle_weight: f32,
    /// Fallback score weight on distance; breaks angular ties.
    pub distance_weight: f32,
    /// Brightness multiplier applied to the highlighted entity's base color.
    pub highlight_gain: f32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            max_detection_distance: 80.0,
            max_angle_rad: 0.03,
            ndc_tolerance: 0.045,
            angle_weight: 1000.0,
            distance_weight: 0.01,
            highlight_gain: 1.8,
        }
    }
}

/// Discovery hunt tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HuntConfig {
    /// Number of targets drawn per session (capped by placed entity count).
    pub target_count: usize,
    /// Distance within which a target counts as discovered.
    pub discovery_radius: f32,
    /// Seconds before the same entity can trigger a visit again.
    pub revisit_cooldown: f64,
    /// Seconds for the dimming ramp to go from 0 to 1.
    pub dimming_ramp: f64,
    /// Dimming progress refunded on each discovery.
    pub discovery_dim_rebate: f32,
    /// Brightness floor for fully dimmed non-target entities.
    pub dim_floor: f32,
    /// Pulse angular speed for undiscovered targets, in rad/s.
    pub pulse_speed: f64,
    /// Pulse amplitude around the base brightness.
    pub pulse_intensity: f32,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            target_count: 10,
            discovery_radius: 8.0,
            revisit_cooldown: 1.5,
            dimming_ramp: 1.0,
            discovery_dim_rebate: 0.3,
            dim_floor: 0.05,
            pulse_speed: 1.0,
            pulse_intensity: 0.3,
        }
    }
}

/// Pointer/keyboard input tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Pointer sensitivity in radians per pixel of motion.
    pub mouse_sensitivity: f32,
    /// Invert the pitch response to vertical pointer motion.
    pub invert_pitch: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.0015,
            invert_pitch: false,
        }
    }
}

/// Debug/development settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Load / Save / Reload ---

impl GameConfig {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: GameConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            tracing::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = GameConfig::default();
            config.save(config_dir)?;
            tracing::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: GameConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            tracing::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
