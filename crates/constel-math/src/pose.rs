//! Position + orientation pair with the quaternion operations the flight and
//! camera systems share.
//!
//! Forward is local `-Z`, right is `+X`, up is `+Y`. Incremental turning is
//! expressed as a yaw about world up composed with a pitch about the current
//! local right axis, renormalized each step to keep the quaternion unit length.

use glam::{Mat3, Quat, Vec3};

/// A rigid pose: position plus unit-quaternion orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Position in world space.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Origin with identity orientation (facing -Z).
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Create a pose from position and orientation.
    #[must_use]
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Forward direction in world space (local -Z).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Right direction in world space (local +X).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// Up direction in world space (local +Y).
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }
}

/// Compose incremental yaw (about world up) and pitch (about the current
/// local right axis) onto an orientation, renormalizing the result.
#[must_use]
pub fn compose_yaw_pitch(orientation: Quat, yaw: f32, pitch: f32) -> Quat {
    let yaw_q = Quat::from_axis_angle(Vec3::Y, yaw);
    let pitch_q = Quat::from_axis_angle(orientation * Vec3::X, pitch);
    (yaw_q * pitch_q * orientation).normalize()
}

/// Orientation that looks from `eye` toward `target` with the given up hint.
///
/// Returns `None` when the look direction is degenerate (zero length or
/// parallel to `up`); callers keep their previous orientation in that case.
#[must_use]
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Option<Quat> {
    let to_target = target - eye;
    if to_target.length_squared() < 1e-12 {
        return None;
    }
    let forward = to_target.normalize();
    let right = forward.cross(up).normalize_or_zero();
    if right.length_squared() < 1e-6 {
        return None;
    }
    let true_up = right.cross(forward);
    Some(Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_pose_faces_negative_z() {
        let pose = Pose::IDENTITY;
        assert!((pose.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((pose.right() - Vec3::X).length() < 1e-6);
        assert!((pose.up() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_look_at_points_forward_at_target() {
        let eye = Vec3::new(0.0, 2.0, 5.0);
        let target = Vec3::new(3.0, 0.0, -4.0);
        let q = look_at(eye, target, Vec3::Y).expect("non-degenerate look");
        let forward = q * Vec3::NEG_Z;
        let expected = (target - eye).normalize();
        assert!(
            (forward - expected).length() < 1e-5,
            "forward {forward} should match {expected}"
        );
    }

    #[test]
    fn test_look_at_degenerate_direction_is_none() {
        assert!(look_at(Vec3::ZERO, Vec3::ZERO, Vec3::Y).is_none());
        // Looking straight up with an up hint of +Y has no stable right axis.
        assert!(look_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y).is_none());
    }

    #[test]
    fn test_compose_yaw_rotates_about_world_up() {
        let q = compose_yaw_pitch(Quat::IDENTITY, std::f32::consts::FRAC_PI_2, 0.0);
        let forward = q * Vec3::NEG_Z;
        // Quarter turn left: -Z forward becomes -X.
        assert!((forward - Vec3::NEG_X).length() < 1e-5, "got {forward}");
    }

    #[test]
    fn test_compose_pitch_rotates_about_local_right() {
        let q = compose_yaw_pitch(Quat::IDENTITY, 0.0, std::f32::consts::FRAC_PI_2);
        let forward = q * Vec3::NEG_Z;
        // Positive pitch about +X tips -Z forward up to +Y.
        assert!((forward - Vec3::Y).length() < 1e-5, "got {forward}");
    }

    #[test]
    fn test_compose_keeps_quaternion_normalized() {
        let mut q = Quat::IDENTITY;
        for _ in 0..1000 {
            q = compose_yaw_pitch(q, 0.013, -0.007);
        }
        assert!((q.length() - 1.0).abs() < 1e-4);
    }
}
