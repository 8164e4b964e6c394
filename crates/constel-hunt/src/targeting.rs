//! Crosshair target acquisition.
//!
//! Each frame, at most one entity is chosen as the crosshair target. The
//! precise path is a ray cast against the render batches, resolved through
//! the registry's reverse index. When the ray misses (small targets at long
//! range make that common), a heuristic scan picks the entity closest to the
//! view axis, gated by distance, angular offset, and a screen-space
//! tolerance window that rejects near-axis false positives at long range.
//! A ray hit always wins over the heuristic.

use constel_config::TargetingConfig;
use constel_math::project_ndc;
use constel_scene::{NodeId, RenderBatches, SceneRegistry};
use glam::{Quat, Vec3};

use crate::events::HudSink;

/// Camera parameters the acquisition needs for ray and screen-space tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Camera position in world space.
    pub position: Vec3,
    /// Camera orientation (-Z forward).
    pub orientation: Quat,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
}

impl CameraView {
    /// View direction in world space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }
}

/// Highlight bookkeeping for the crosshair target.
///
/// Owns the invariant that at most one entity carries the highlight color at
/// any instant: the previous target's base color is restored before a new
/// highlight is applied.
#[derive(Debug, Clone, Default)]
pub struct TargetAcquisition {
    active: Option<NodeId>,
}

impl TargetAcquisition {
    /// No highlight active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently highlighted entity, if any.
    #[must_use]
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Drop highlight bookkeeping without touching colors (used when the
    /// whole scene is being restored or torn down anyway).
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Run one acquisition pass: restore the previous highlight, pick this
    /// frame's target, apply its highlight, and report hover state.
    ///
    /// Returns the acquired entity, if any. `pilot_position` is only used
    /// for the hover distance readout.
    pub fn update(
        &mut self,
        view: &CameraView,
        pilot_position: Vec3,
        registry: &mut SceneRegistry,
        batches: &mut dyn RenderBatches,
        cfg: &TargetingConfig,
        hud: &mut dyn HudSink,
    ) -> Option<NodeId> {
        if let Some(prev) = self.active.take() {
            registry.restore_base_color(prev, batches);
        }

        let chosen = batches
            .raycast(view.position, view.forward())
            .and_then(|hit| registry.resolve_hit(hit.batch, hit.slot))
            .or_else(|| self.scan_fallback(view, registry, cfg));

        match chosen {
            Some(id) => {
                if let Some(base) = registry.get(id).map(|n| n.base_color) {
                    registry.set_display_color(id, base.scaled(cfg.highlight_gain), batches);
                }
                self.active = Some(id);
                if let Some(node) = registry.get(id) {
                    let distance = pilot_position.distance(node.position);
                    hud.on_hover(Some(node), Some(distance));
                }
                Some(id)
            }
            None => {
                hud.on_hover(None, None);
                None
            }
        }
    }

    /// Heuristic fallback: among entities within detection range whose
    /// angular and screen-space offsets pass the gates, minimize
    /// `angle * angle_weight + distance * distance_weight`.
    fn scan_fallback(
        &self,
        view: &CameraView,
        registry: &SceneRegistry,
        cfg: &TargetingConfig,
    ) -> Option<NodeId> {
        let view_dir = view.forward();
        let fov_y_rad = view.fov_y_deg.to_radians();
        let mut best: Option<(NodeId, f32)> = None;

        for node in registry.iter() {
            let to_node = node.position - view.position;
            let distance = to_node.length();
            if distance > cfg.max_detection_distance || distance < 1e-6 {
                continue;
            }
            let angle = view_dir.angle_between(to_node / distance);
            if angle > cfg.max_angle_rad {
                continue;
            }
            let Some(ndc) = project_ndc(
                node.position,
                view.position,
                view.orientation,
                fov_y_rad,
                view.aspect,
            ) else {
                continue;
            };
            if ndc.x.abs() > cfg.ndc_tolerance || ndc.y.abs() > cfg.ndc_tolerance {
                continue;
            }
            let score = angle * cfg.angle_weight + distance * cfg.distance_weight;
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((node.id, score));
            }
        }
        best.map(|(id, _)| id)
    }
}
