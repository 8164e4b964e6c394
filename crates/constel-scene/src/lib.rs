//! Entity registry, render-batch abstraction, and dataset bounds for Constel.
//!
//! The registry is an arena of placed entities indexed by [`NodeId`], with a
//! secondary `(batch, slot) → NodeId` map for O(1) ray-hit resolution.
//! Rendering itself is an external collaborator behind the [`RenderBatches`]
//! trait; [`SphereBatches`] is the reference implementation used by tests
//! and the headless demo.

mod batches;
mod bounds;
mod color;
mod registry;

pub use batches::{BatchHit, BatchId, BatchSpec, RenderBatches, SphereBatches, NODE_RADIUS};
pub use bounds::SceneBounds;
pub use color::Rgb;
pub use registry::{NodeEntity, NodeId, NodeSeed, SceneRegistry};
