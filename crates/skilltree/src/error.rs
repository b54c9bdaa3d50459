use crate::node::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("skill tree payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node {node} references missing neighbor {neighbor}")]
    MissingNeighbor { node: NodeId, neighbor: NodeId },

    #[error("node {node} references missing group {group}")]
    MissingGroup { node: NodeId, group: u32 },

    #[error("node {node} sits on orbit {orbit} but the orbit radius table has {radii} entries")]
    MissingOrbit {
        node: NodeId,
        orbit: usize,
        radii: usize,
    },

    #[error("node id {id} is declared more than once")]
    DuplicateNode { id: NodeId },

    #[error("unknown node id {id}")]
    UnknownNode { id: NodeId },
}

impl Error {
    /// `true` for errors that reject a whole tree load.
    pub fn is_data_integrity(&self) -> bool {
        !matches!(self, Error::UnknownNode { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A node that no rule of a classification table matched.
///
/// Never fatal: callers log it and fall back to a neutral default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("node {node} matched no rule in the {table} table")]
pub struct ClassificationGap {
    pub node: NodeId,
    pub table: &'static str,
}
