//! Arcade flight model: a damped velocity integrator, not a rigid body.
//!
//! Thrust adds to velocity along the pilot's local axes, exponential damping
//! bleeds it back out, and the speed cap is enforced by uniform rescaling
//! after every step. Pointer input converts once per frame into yaw/pitch
//! angular velocities which decay under their own damping rate, giving
//! turning the same weighty feel as translation.

use constel_config::FlightConfig;
use constel_input::FrameInput;
use constel_math::{Pose, compose_yaw_pitch, decay_factor};
use constel_scene::SceneBounds;
use glam::Vec3;

/// Pilot state, mutated once per frame by [`step_flight`].
#[derive(Debug, Clone, PartialEq)]
pub struct PilotState {
    /// Position and orientation. Forward is local -Z.
    pub pose: Pose,
    /// Linear velocity in world space, units/s.
    pub velocity: Vec3,
    /// Yaw angular velocity in rad/s.
    pub yaw_velocity: f32,
    /// Pitch angular velocity in rad/s.
    pub pitch_velocity: f32,
    /// Accumulated pitch in radians, tracked for the optional pitch limit.
    pub pitch_total: f32,
    /// Whether the pilot was boosting on the last step.
    pub boosting: bool,
}

impl Default for PilotState {
    fn default() -> Self {
        Self::new()
    }
}

impl PilotState {
    /// A stationary pilot at the origin, facing -Z.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pose: Pose::IDENTITY,
            velocity: Vec3::ZERO,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            pitch_total: 0.0,
            boosting: false,
        }
    }

    /// Current speed in units/s.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Forward direction in world space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.pose.forward()
    }

    /// Right direction in world space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.pose.right()
    }

    /// Up direction in world space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.pose.up()
    }
}

/// Per-step outputs the camera and HUD need beyond the pilot state itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightFrame {
    /// Speed cap in effect this step (boosted or not).
    pub current_max_speed: f32,
    /// Soft boundary pressure in `[0, 1]`; zero inside the boundary.
    pub boundary_pressure: f32,
    /// Whether boost was active this step.
    pub boosting: bool,
    /// Speed after the step.
    pub speed: f32,
}

/// Advance the pilot by one frame.
///
/// `input` is the drained inbox for this frame; `bounds` is the dataset's
/// containment boundary (absent for an empty layout, in which case no
/// boundary force applies). `dt` is the clamped frame delta in seconds.
pub fn step_flight(
    pilot: &mut PilotState,
    input: &FrameInput,
    bounds: Option<&SceneBounds>,
    cfg: &FlightConfig,
    dt: f32,
) -> FlightFrame {
    let boosting = input.intents.forward && input.intents.boost;
    pilot.boosting = boosting;

    let mut thrust = cfg.thrust_accel;
    let mut current_max_speed = cfg.max_speed;
    let mut damping = cfg.linear_damping;
    if boosting {
        thrust *= cfg.boost_thrust_multiplier;
        current_max_speed *= cfg.boost_speed_multiplier;
        damping *= cfg.boost_damping_multiplier;
    }
    if input.intents.brake {
        damping *= cfg.brake_drag;
    }

    // Thrust phase: forward plus scaled lateral contributions.
    let forward = pilot.forward();
    let right = pilot.right();
    if input.intents.forward {
        pilot.velocity += forward * (thrust * dt);
    }
    if input.intents.strafe_left {
        pilot.velocity -= right * (thrust * cfg.strafe_factor * dt);
    }
    if input.intents.strafe_right {
        pilot.velocity += right * (thrust * cfg.strafe_factor * dt);
    }

    // Soft boundary: quadratic inward ramp past the start fraction.
    let boundary_pressure = match bounds {
        Some(bounds) if bounds.boundary_radius > 0.0 => {
            let offset = pilot.pose.position - bounds.center;
            let dist = offset.length();
            let start = bounds.boundary_radius * cfg.boundary_start_factor;
            if dist > start {
                let margin = bounds.boundary_radius - start;
                let t = ((dist - start) / margin).min(1.0);
                let inward = -offset.normalize_or_zero();
                pilot.velocity += inward * (cfg.boundary_push_strength * t * t * dt);
                t
            } else {
                0.0
            }
        }
        _ => 0.0,
    };

    // Pointer deltas convert to angular velocity exactly once per frame.
    pilot.yaw_velocity += input.yaw * cfg.yaw_gain;
    pilot.pitch_velocity += input.pitch * cfg.pitch_gain;

    // Exponential decay keeps damping frame-rate independent to first order.
    pilot.velocity *= decay_factor(damping, dt);
    let angular_factor = decay_factor(cfg.angular_damping, dt);
    pilot.yaw_velocity *= angular_factor;
    pilot.pitch_velocity *= angular_factor;

    // Speed cap by uniform rescaling, so direction is preserved.
    let speed = pilot.velocity.length();
    if speed > current_max_speed {
        pilot.velocity *= current_max_speed / speed;
    }

    pilot.pose.position += pilot.velocity * dt;

    let yaw_step = pilot.yaw_velocity * dt;
    let mut pitch_step = pilot.pitch_velocity * dt;
    if let Some(limit) = cfg.pitch_limit {
        let clamped_total = (pilot.pitch_total + pitch_step).clamp(-limit, limit);
        pitch_step = clamped_total - pilot.pitch_total;
    }
    pilot.pitch_total += pitch_step;
    pilot.pose.orientation = compose_yaw_pitch(pilot.pose.orientation, yaw_step, pitch_step);

    FlightFrame {
        current_max_speed,
        boundary_pressure,
        boosting,
        speed: pilot.speed(),
    }
}
