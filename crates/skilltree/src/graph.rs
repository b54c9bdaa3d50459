use indexmap::IndexMap;

use crate::builder;
use crate::classify::{Classification, ConnectionType};
use crate::config::BuildOptions;
use crate::error::{Error, Result};
use crate::geometry::OrbitTable;
use crate::node::{NodeId, SkillNode};
use crate::raw::RawTree;
use crate::state::NodeStates;

/// Payload bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.min_x.abs() + self.max_x.abs()
    }

    pub fn height(&self) -> f64 {
        self.min_y.abs() + self.max_y.abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionStyle {
    Line,
    /// Both ends share a group and a non-zero orbit; drawn along the orbit.
    Arc,
}

impl ConnectionStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionStyle::Line => "Line",
            ConnectionStyle::Arc => "Arc",
        }
    }
}

/// A drawable edge, reported once per unordered pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: NodeId,
    pub b: NodeId,
    pub kind: ConnectionType,
    pub style: ConnectionStyle,
}

/// One loaded tree version.
///
/// Owns every node by value; relationships are ids, so state changes never touch adjacency.
/// A comparison tree is a second, independent instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillTree {
    pub(crate) nodes: IndexMap<NodeId, SkillNode>,
    bounds: Bounds,
    scale: f64,
    orbits: OrbitTable,
}

impl SkillTree {
    pub(crate) fn new(
        nodes: IndexMap<NodeId, SkillNode>,
        bounds: Bounds,
        scale: f64,
        orbits: OrbitTable,
    ) -> Self {
        Self {
            nodes,
            bounds,
            scale,
            orbits,
        }
    }

    pub fn build(raw: RawTree, options: &BuildOptions) -> Result<Self> {
        builder::build(raw, options)
    }

    pub fn from_json(text: &str, options: &BuildOptions) -> Result<Self> {
        let raw = RawTree::from_json(text)?;
        builder::build(raw, options)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn orbits(&self) -> &OrbitTable {
        &self.orbits
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SkillNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SkillNode> {
        self.nodes.values()
    }

    fn get(&self, id: NodeId) -> Result<&SkillNode> {
        self.nodes.get(&id).ok_or(Error::UnknownNode { id })
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut SkillNode> {
        self.nodes.get_mut(&id).ok_or(Error::UnknownNode { id })
    }

    pub fn set_state(&mut self, id: NodeId, flags: NodeStates) -> Result<()> {
        self.get_mut(id)?.set_state(flags);
        Ok(())
    }

    pub fn clear_state(&mut self, id: NodeId, flags: NodeStates) -> Result<()> {
        self.get_mut(id)?.clear_state(flags);
        Ok(())
    }

    pub fn has_state(&self, id: NodeId, flags: NodeStates) -> Result<bool> {
        Ok(self.get(id)?.has_state(flags))
    }

    /// Clears `flags` on every node, e.g. when a hover preview ends.
    pub fn clear_state_everywhere(&mut self, flags: NodeStates) {
        for node in self.nodes.values_mut() {
            node.clear_state(flags);
        }
    }

    /// Out-neighbors of `id`.
    pub fn neighbors(&self, id: NodeId) -> Result<impl Iterator<Item = &SkillNode>> {
        let node = self.get(id)?;
        Ok(node.out().iter().filter_map(|n| self.nodes.get(n)))
    }

    pub fn classify(&self, id: NodeId) -> Result<Classification> {
        let node = self.get(id)?;
        Ok(node.classify(self.neighbors(id)?))
    }

    pub fn connection(&self, a: NodeId, b: NodeId) -> Result<ConnectionType> {
        Ok(self.get(a)?.connection_type(self.get(b)?))
    }

    pub fn connection_style(&self, a: &SkillNode, b: &SkillNode) -> ConnectionStyle {
        if a.group.is_some() && a.group == b.group && a.orbit != 0 && a.orbit == b.orbit {
            ConnectionStyle::Arc
        } else {
            ConnectionStyle::Line
        }
    }

    /// Every drawable edge once, lower id first.
    ///
    /// Edges touching a mastery and edges crossing the ascendancy boundary are not drawn.
    pub fn connections(&self) -> Vec<Connection> {
        let mut out = Vec::new();
        for a in self.nodes.values() {
            if a.is_mastery {
                continue;
            }
            for b in a.out().iter().filter(|&&b| b > a.id) {
                let Some(b) = self.nodes.get(b) else {
                    continue;
                };
                if b.is_mastery || a.ascendancy_name != b.ascendancy_name {
                    continue;
                }
                out.push(Connection {
                    a: a.id,
                    b: b.id,
                    kind: a.connection_type(b),
                    style: self.connection_style(a, b),
                });
            }
        }
        out
    }
}
