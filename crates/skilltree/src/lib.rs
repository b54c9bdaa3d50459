#![forbid(unsafe_code)]

//! Headless passive skill tree graph.
//!
//! `skilltree` turns a versioned tree payload into a symmetric node graph, places every node on
//! its group's orbit, tracks per-node interaction state (allocated, hovered, pathing, ...) and
//! classifies nodes and connections into the asset keys a renderer draws. It performs no I/O and
//! never pushes to a renderer; callers mutate state and ask for classifications.

pub mod builder;
pub mod classify;
pub mod compare;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod node;
pub mod query;
pub mod raw;
pub mod state;

pub use classify::{
    Classification, ConnectionType, DrawType, FrameAsset, SpriteKey, TargetCategory,
};
pub use compare::CompareSummary;
pub use config::{BuildOptions, TreeOptions};
pub use error::{ClassificationGap, Error, Result};
pub use geometry::{OrbitTable, Point, Size};
pub use graph::{Bounds, Connection, ConnectionStyle, SkillTree};
pub use node::{NodeId, SkillNode};
pub use query::PointCounts;
pub use raw::RawTree;
pub use state::NodeStates;

/// Builds a tree graph from a decoded payload.
pub fn build_graph(raw: RawTree, options: &BuildOptions) -> Result<SkillTree> {
    builder::build(raw, options)
}

/// Connection type between two nodes; symmetric in its arguments.
pub fn classify_connection(a: &SkillNode, b: &SkillNode) -> ConnectionType {
    classify::connection_type(a, b)
}

#[cfg(test)]
mod tests;
