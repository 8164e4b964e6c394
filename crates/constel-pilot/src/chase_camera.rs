//! Chase camera: follow pose and speed-reactive field of view.
//!
//! The camera hangs behind and above the pilot along a "softened" up vector
//! (world up blended with a fraction of the pilot's banked up, which keeps
//! camera roll tolerable), pulls back and looks further ahead as speed
//! rises, and widens its field of view toward a speed-scaled target through
//! exponential smoothing.

use constel_config::CameraConfig;
use constel_math::{Pose, approach_alpha, look_at};
use glam::Vec3;

use crate::flight::{FlightFrame, PilotState};

/// Chase camera state: pose plus smoothed field of view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaseCamera {
    /// Camera pose, recomputed every frame.
    pub pose: Pose,
    /// Current vertical field of view in degrees.
    pub fov_deg: f32,
}

impl ChaseCamera {
    /// Camera at the base field of view, pose not yet meaningful until the
    /// first snap or update.
    #[must_use]
    pub fn new(cfg: &CameraConfig) -> Self {
        Self {
            pose: Pose::IDENTITY,
            fov_deg: cfg.base_fov_deg,
        }
    }

    /// Place the camera at its static follow offset immediately, without
    /// smoothing. Used on mode entry so the first frame doesn't interpolate
    /// from a stale pose.
    pub fn snap_to(&mut self, pilot: &PilotState, cfg: &CameraConfig) {
        let forward = pilot.forward();
        let right = pilot.right();
        let position = pilot.pose.position
            + Vec3::Y * cfg.follow_height
            - forward * cfg.follow_distance
            + right * cfg.follow_lateral;
        let target = pilot.pose.position + Vec3::from(cfg.target_offset);
        self.pose.position = position;
        if let Some(orientation) = look_at(position, target, Vec3::Y) {
            self.pose.orientation = orientation;
        }
    }
}

/// Derive the camera pose and field of view for this frame.
pub fn update_chase_camera(
    camera: &mut ChaseCamera,
    pilot: &PilotState,
    frame: &FlightFrame,
    cfg: &CameraConfig,
    dt: f32,
) {
    let forward = pilot.forward();
    let blended_up = Vec3::Y.lerp(pilot.up(), cfg.roll_blend).normalize_or_zero();
    let right = blended_up.cross(forward).normalize_or_zero();

    let speed_ratio = (frame.speed / frame.current_max_speed.max(1e-3)).min(1.0);
    let dynamic_distance = cfg.follow_distance + cfg.dynamic_distance_boost * speed_ratio;
    let look_ahead = forward * (cfg.look_ahead * speed_ratio);

    camera.pose.position = pilot.pose.position
        + blended_up * cfg.follow_height
        - forward * dynamic_distance
        + right * cfg.follow_lateral;

    let look_target = pilot.pose.position + Vec3::from(cfg.target_offset) + look_ahead;
    if let Some(orientation) = look_at(camera.pose.position, look_target, blended_up) {
        camera.pose.orientation = orientation;
    }

    // Boundary pressure bumps the FOV before the smoothing step pulls it
    // back toward the speed-scaled target.
    if frame.boundary_pressure > 0.0 {
        camera.fov_deg =
            cfg.base_fov_deg + cfg.fov_boost_deg * cfg.boundary_fov_factor * frame.boundary_pressure;
    }
    let target_fov = cfg.base_fov_deg + cfg.fov_boost_deg * speed_ratio;
    camera.fov_deg += (target_fov - camera.fov_deg) * approach_alpha(cfg.fov_smoothing_base, dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use constel_config::FlightConfig;
    use constel_input::{FlightIntents, FrameInput};
    use crate::flight::step_flight;

    const DT: f32 = 1.0 / 60.0;

    fn still_frame(cfg: &FlightConfig) -> FlightFrame {
        FlightFrame {
            current_max_speed: cfg.max_speed,
            boundary_pressure: 0.0,
            boosting: false,
            speed: 0.0,
        }
    }

    #[test]
    fn test_snap_places_camera_behind_and_above() {
        let cam_cfg = CameraConfig::default();
        let pilot = PilotState::new();
        let mut camera = ChaseCamera::new(&cam_cfg);
        camera.snap_to(&pilot, &cam_cfg);
        // Pilot faces -Z, so "behind" is +Z.
        assert!((camera.pose.position.z - cam_cfg.follow_distance).abs() < 1e-5);
        assert!((camera.pose.position.y - cam_cfg.follow_height).abs() < 1e-5);
        // And the camera looks toward the pilot.
        let to_pilot = (pilot.pose.position - camera.pose.position).normalize();
        assert!(camera.pose.forward().dot(to_pilot) > 0.9);
    }

    #[test]
    fn test_follow_distance_grows_with_speed() {
        let cam_cfg = CameraConfig::default();
        let flight_cfg = FlightConfig::default();
        let pilot = PilotState::new();
        let mut slow_cam = ChaseCamera::new(&cam_cfg);
        let mut fast_cam = ChaseCamera::new(&cam_cfg);

        update_chase_camera(&mut slow_cam, &pilot, &still_frame(&flight_cfg), &cam_cfg, DT);
        let fast = FlightFrame {
            speed: flight_cfg.max_speed,
            ..still_frame(&flight_cfg)
        };
        update_chase_camera(&mut fast_cam, &pilot, &fast, &cam_cfg, DT);

        let slow_dist = slow_cam.pose.position.distance(pilot.pose.position);
        let fast_dist = fast_cam.pose.position.distance(pilot.pose.position);
        assert!(
            fast_dist > slow_dist + cam_cfg.dynamic_distance_boost * 0.9,
            "slow {slow_dist} fast {fast_dist}"
        );
    }

    #[test]
    fn test_fov_approaches_speed_target() {
        let cam_cfg = CameraConfig::default();
        let flight_cfg = FlightConfig::default();
        let pilot = PilotState::new();
        let mut camera = ChaseCamera::new(&cam_cfg);
        let fast = FlightFrame {
            speed: flight_cfg.max_speed,
            ..still_frame(&flight_cfg)
        };
        for _ in 0..600 {
            update_chase_camera(&mut camera, &pilot, &fast, &cam_cfg, DT);
        }
        let target = cam_cfg.base_fov_deg + cam_cfg.fov_boost_deg;
        assert!(
            (camera.fov_deg - target).abs() < 0.5,
            "fov {} should be near {target}",
            camera.fov_deg
        );
        // And decays back once slow.
        for _ in 0..600 {
            update_chase_camera(&mut camera, &pilot, &still_frame(&flight_cfg), &cam_cfg, DT);
        }
        assert!((camera.fov_deg - cam_cfg.base_fov_deg).abs() < 0.5);
    }

    #[test]
    fn test_boundary_pressure_bumps_fov() {
        let cam_cfg = CameraConfig::default();
        let flight_cfg = FlightConfig::default();
        let pilot = PilotState::new();
        let mut camera = ChaseCamera::new(&cam_cfg);
        let squeezed = FlightFrame {
            boundary_pressure: 1.0,
            ..still_frame(&flight_cfg)
        };
        update_chase_camera(&mut camera, &pilot, &squeezed, &cam_cfg, DT);
        assert!(camera.fov_deg > cam_cfg.base_fov_deg + 1.0);
    }

    #[test]
    fn test_camera_tracks_moving_pilot() {
        let cam_cfg = CameraConfig::default();
        let flight_cfg = FlightConfig::default();
        let mut pilot = PilotState::new();
        let mut camera = ChaseCamera::new(&cam_cfg);
        camera.snap_to(&pilot, &cam_cfg);

        let thrust = FrameInput {
            intents: FlightIntents {
                forward: true,
                ..FlightIntents::default()
            },
            ..FrameInput::default()
        };
        for _ in 0..300 {
            let frame = step_flight(&mut pilot, &thrust, None, &flight_cfg, DT);
            update_chase_camera(&mut camera, &pilot, &frame, &cam_cfg, DT);
        }
        let dist = camera.pose.position.distance(pilot.pose.position);
        let max_follow = cam_cfg.follow_distance
            + cam_cfg.dynamic_distance_boost
            + cam_cfg.follow_height
            + cam_cfg.follow_lateral;
        assert!(dist <= max_follow + 0.1, "camera fell behind: {dist}");
        // Camera keeps looking roughly at the pilot's travel direction.
        assert!(camera.pose.forward().dot(pilot.forward()) > 0.8);
    }

    #[test]
    fn test_blended_up_softens_roll() {
        let cam_cfg = CameraConfig::default();
        let flight_cfg = FlightConfig::default();
        // Pilot banked 90°: local up is world +X.
        let mut pilot = PilotState::new();
        pilot.pose.orientation = glam::Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2);
        let mut camera = ChaseCamera::new(&cam_cfg);
        update_chase_camera(&mut camera, &pilot, &still_frame(&flight_cfg), &cam_cfg, DT);
        // Camera up should stay mostly world-up rather than following the bank.
        let cam_up = camera.pose.up();
        assert!(cam_up.y > 0.8, "camera up {} should stay near world up", cam_up);
    }
}
