//! Dataset bounds: center and soft boundary radius of the active layout.

use glam::Vec3;

/// Padding applied to the largest half-extent to get the boundary radius,
/// leaving room to fly around the outermost entities.
const BOUNDARY_PADDING: f32 = 1.35;

/// Bounding information for the active layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBounds {
    /// Center of the layout's bounding box.
    pub center: Vec3,
    /// Radius of the soft containment boundary.
    pub boundary_radius: f32,
}

impl SceneBounds {
    /// Compute bounds from entity positions. Returns `None` for an empty
    /// layout, where there is nothing to contain.
    #[must_use]
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min = min.min(p);
            max = max.max(p);
        }
        let center = (min + max) * 0.5;
        let half = max - center;
        let boundary_radius = half.x.max(half.y).max(half.z) * BOUNDARY_PADDING;
        Some(Self {
            center,
            boundary_radius,
        })
    }
}
