//! Perspective projection of world points into normalized device coordinates.

use glam::{Quat, Vec2, Vec3};

/// Project a world-space point into NDC for a camera at `eye` with the given
/// orientation (-Z forward), vertical field of view, and aspect ratio.
///
/// Returns `None` for points at or behind the camera plane. The result is
/// `(-1, -1)..(1, 1)` inside the frustum and grows past ±1 outside it, which
/// is exactly what the crosshair tolerance window needs.
#[must_use]
pub fn project_ndc(
    point: Vec3,
    eye: Vec3,
    orientation: Quat,
    fov_y_rad: f32,
    aspect: f32,
) -> Option<Vec2> {
    let local = orientation.inverse() * (point - eye);
    if local.z >= -1e-6 {
        return None;
    }
    let half_h = (fov_y_rad * 0.5).tan();
    let depth = -local.z;
    Some(Vec2::new(
        local.x / depth / (half_h * aspect),
        local.y / depth / half_h,
    ))
}
