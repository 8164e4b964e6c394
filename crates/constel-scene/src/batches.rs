//! Render batch abstraction and an analytic sphere implementation.
//!
//! Entities are grouped into one batch per base color (instanced drawing is
//! cheapest when a batch shares a material). The core only needs two
//! operations from a renderer: ray intersection resolving to `(batch, slot)`
//! and per-slot color writes; everything else stays on the render side of
//! the seam.

use glam::Vec3;

use crate::color::Rgb;

/// Visual radius of a node instance, shared by batching and picking.
pub const NODE_RADIUS: f32 = 0.5;

/// Identifier of one color batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(pub u32);

/// A ray intersection with a batch instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchHit {
    /// The batch containing the hit instance.
    pub batch: BatchId,
    /// Instance slot within the batch.
    pub slot: u32,
    /// Distance from the ray origin to the hit.
    pub distance: f32,
}

/// Blueprint for constructing one concrete batch: the shared base color and
/// the per-slot instance positions, in slot order.
#[derive(Debug, Clone)]
pub struct BatchSpec {
    /// Batch identifier, matching the registry's reverse index.
    pub id: BatchId,
    /// Base color shared by every instance in the batch.
    pub color: Rgb,
    /// Instance positions; the index into this list is the slot.
    pub positions: Vec<Vec3>,
}

/// The contract the core needs from a renderer's instanced batches.
pub trait RenderBatches {
    /// Cast a ray and return the nearest instance hit, if any.
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<BatchHit>;

    /// Overwrite the displayed color of one instance slot.
    fn write_color(&mut self, batch: BatchId, slot: u32, color: Rgb);
}

/// Analytic sphere batches: each instance is a sphere of [`NODE_RADIUS`].
///
/// Reference implementation of [`RenderBatches`] for tests and headless use;
/// a GPU renderer would substitute its own instanced meshes here.
#[derive(Debug, Clone)]
pub struct SphereBatches {
    batches: Vec<SphereBatch>,
    radius: f32,
}

#[derive(Debug, Clone)]
struct SphereBatch {
    id: BatchId,
    positions: Vec<Vec3>,
    colors: Vec<Rgb>,
}

impl SphereBatches {
    /// Build sphere batches from specs, seeding every slot's color with the
    /// batch base color.
    #[must_use]
    pub fn new(specs: &[BatchSpec]) -> Self {
        Self::with_radius(specs, NODE_RADIUS)
    }

    /// Build with a custom instance radius.
    #[must_use]
    pub fn with_radius(specs: &[BatchSpec], radius: f32) -> Self {
        let batches = specs
            .iter()
            .map(|spec| SphereBatch {
                id: spec.id,
                positions: spec.positions.clone(),
                colors: vec![spec.color; spec.positions.len()],
            })
            .collect();
        Self { batches, radius }
    }

    /// Displayed color of one slot, if it exists.
    #[must_use]
    pub fn color_of(&self, batch: BatchId, slot: u32) -> Option<Rgb> {
        self.batches
            .iter()
            .find(|b| b.id == batch)
            .and_then(|b| b.colors.get(slot as usize).copied())
    }

    fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
        let oc = origin - center;
        let b = oc.dot(dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t = -b - sqrt_disc;
        if t >= 0.0 {
            return Some(t);
        }
        let t = -b + sqrt_disc;
        (t >= 0.0).then_some(t)
    }
}

impl RenderBatches for SphereBatches {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<BatchHit> {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() < 1e-6 {
            return None;
        }
        let mut best: Option<BatchHit> = None;
        for batch in &self.batches {
            for (slot, center) in batch.positions.iter().enumerate() {
                if let Some(t) = Self::ray_sphere(origin, dir, *center, self.radius)
                    && best.is_none_or(|hit| t < hit.distance)
                {
                    best = Some(BatchHit {
                        batch: batch.id,
                        slot: slot as u32,
                        distance: t,
                    });
                }
            }
        }
        best
    }

    fn write_color(&mut self, batch: BatchId, slot: u32, color: Rgb) {
        if let Some(batch) = self.batches.iter_mut().find(|b| b.id == batch)
            && let Some(stored) = batch.colors.get_mut(slot as usize)
        {
            *stored = color;
        }
    }
}
