//! Entity arena with color-grouped batch layout and ray-hit reverse index.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::batches::{BatchId, BatchSpec, RenderBatches};
use crate::bounds::SceneBounds;
use crate::color::Rgb;

/// Dataset index of an entity. Stable across layouts; an entity keeps its id
/// whether or not the active layout places it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// One row of layout input: an entity that may or may not have a position in
/// the active layout. Entities without a position are invisible and
/// unreachable, never an error.
#[derive(Debug, Clone, Copy)]
pub struct NodeSeed {
    /// Dataset index.
    pub id: NodeId,
    /// Position in the active layout, if the layout places this entity.
    pub position: Option<Vec3>,
    /// Base color from the palette collaborator.
    pub color: Rgb,
}

/// A placed, discoverable entity.
#[derive(Debug, Clone)]
pub struct NodeEntity {
    /// Dataset index.
    pub id: NodeId,
    /// Position in the active layout.
    pub position: Vec3,
    /// Palette color; the restore point for every visual effect.
    pub base_color: Rgb,
    /// Currently displayed color.
    pub current_color: Rgb,
    /// Batch containing this entity's instance.
    pub batch: BatchId,
    /// Instance slot within the batch.
    pub slot: u32,
    /// Time of the last visit, for the revisit cooldown.
    pub last_visit: Option<f64>,
}

/// Arena of placed entities with id and `(batch, slot)` lookups.
#[derive(Debug, Clone, Default)]
pub struct SceneRegistry {
    nodes: Vec<NodeEntity>,
    by_id: FxHashMap<NodeId, usize>,
    by_slot: FxHashMap<(BatchId, u32), NodeId>,
    bounds: Option<SceneBounds>,
}

impl SceneRegistry {
    /// Build the registry and batch blueprints from layout rows.
    ///
    /// Placed entities are grouped into one batch per quantized base color,
    /// mirroring instanced one-material-per-batch drawing. Rows without a
    /// position are skipped. Returns the registry together with the specs a
    /// renderer needs to construct the concrete batches.
    pub fn build<I>(seeds: I) -> (Self, Vec<BatchSpec>)
    where
        I: IntoIterator<Item = NodeSeed>,
    {
        // Group placed rows by color, keeping first-seen group order.
        let mut group_order: Vec<u32> = Vec::new();
        let mut groups: FxHashMap<u32, Vec<(NodeId, Vec3, Rgb)>> = FxHashMap::default();
        for seed in seeds {
            let Some(position) = seed.position else {
                continue;
            };
            let key = seed.color.to_hex();
            groups
                .entry(key)
                .or_insert_with(|| {
                    group_order.push(key);
                    Vec::new()
                })
                .push((seed.id, position, seed.color));
        }

        let mut registry = Self::default();
        let mut specs = Vec::with_capacity(group_order.len());
        for (batch_index, key) in group_order.iter().enumerate() {
            let Some(group) = groups.remove(key) else {
                continue;
            };
            let batch = BatchId(batch_index as u32);
            let mut positions = Vec::with_capacity(group.len());
            let mut batch_color = None;
            for (slot, (id, position, color)) in group.into_iter().enumerate() {
                let slot = slot as u32;
                registry.by_id.insert(id, registry.nodes.len());
                registry.by_slot.insert((batch, slot), id);
                registry.nodes.push(NodeEntity {
                    id,
                    position,
                    base_color: color,
                    current_color: color,
                    batch,
                    slot,
                    last_visit: None,
                });
                positions.push(position);
                batch_color.get_or_insert(color);
            }
            if let Some(color) = batch_color {
                specs.push(BatchSpec {
                    id: batch,
                    color,
                    positions,
                });
            }
        }

        registry.bounds = SceneBounds::from_positions(registry.nodes.iter().map(|n| n.position));
        (registry, specs)
    }

    /// Number of placed entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the layout placed no entities at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Layout bounds, absent for an empty layout.
    #[must_use]
    pub fn bounds(&self) -> Option<&SceneBounds> {
        self.bounds.as_ref()
    }

    /// Entity by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&NodeEntity> {
        self.by_id.get(&id).map(|&i| &self.nodes[i])
    }

    /// Resolve a ray hit's `(batch, slot)` to an entity id.
    #[must_use]
    pub fn resolve_hit(&self, batch: BatchId, slot: u32) -> Option<NodeId> {
        self.by_slot.get(&(batch, slot)).copied()
    }

    /// Iterate all placed entities.
    pub fn iter(&self) -> impl Iterator<Item = &NodeEntity> {
        self.nodes.iter()
    }

    /// All placed entity ids, in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    /// Set an entity's displayed color, mirroring it into the render batch.
    pub fn set_display_color(&mut self, id: NodeId, color: Rgb, batches: &mut dyn RenderBatches) {
        if let Some(&index) = self.by_id.get(&id) {
            let node = &mut self.nodes[index];
            node.current_color = color;
            batches.write_color(node.batch, node.slot, color);
        }
    }

    /// Restore an entity's displayed color to its base color.
    pub fn restore_base_color(&mut self, id: NodeId, batches: &mut dyn RenderBatches) {
        if let Some(&index) = self.by_id.get(&id) {
            let node = &mut self.nodes[index];
            node.current_color = node.base_color;
            batches.write_color(node.batch, node.slot, node.base_color);
        }
    }

    /// Restore every entity's displayed color to its base color.
    pub fn restore_all_base_colors(&mut self, batches: &mut dyn RenderBatches) {
        for node in &mut self.nodes {
            node.current_color = node.base_color;
            batches.write_color(node.batch, node.slot, node.base_color);
        }
    }

    /// Stamp an entity's last visit time.
    pub fn mark_visited(&mut self, id: NodeId, now: f64) {
        if let Some(&index) = self.by_id.get(&id) {
            self.nodes[index].last_visit = Some(now);
        }
    }
}
