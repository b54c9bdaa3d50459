//! Read-only views over a tree's nodes.
//!
//! Views are recomputed on every call; state changes happen at interaction rate, so a scan over
//! all nodes is cheap enough and nothing needs invalidating.

use crate::graph::SkillTree;
use crate::node::SkillNode;
use crate::state::NodeStates;

/// Allocated point totals as shown by the points panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointCounts {
    pub normal: usize,
    pub ascendancy: usize,
}

impl SkillTree {
    pub fn nodes_where<'a, F>(&'a self, mut predicate: F) -> impl Iterator<Item = &'a SkillNode>
    where
        F: FnMut(&SkillNode) -> bool + 'a,
    {
        self.nodes.values().filter(move |n| predicate(*n))
    }

    /// Allocated nodes.
    pub fn skilled_nodes(&self) -> Vec<&SkillNode> {
        self.nodes_where(|n| n.has_state(NodeStates::ACTIVE)).collect()
    }

    /// Nodes under the cursor or on the preview path.
    pub fn hovered_nodes(&self) -> Vec<&SkillNode> {
        self.nodes_where(|n| {
            n.state()
                .intersects(NodeStates::HOVERED | NodeStates::PATHING)
        })
        .collect()
    }

    pub fn highlighted_nodes(&self) -> Vec<&SkillNode> {
        self.nodes_where(|n| n.has_state(NodeStates::HIGHLIGHTED))
            .collect()
    }

    pub fn class_start_nodes(&self) -> Vec<&SkillNode> {
        self.nodes_where(|n| !n.class_starts.is_empty()).collect()
    }

    /// Allocated nodes that cost a point, split by tree section.
    pub fn counts(&self) -> PointCounts {
        let mut counts = PointCounts::default();
        for n in self.nodes.values() {
            if !n.is_active() || !n.class_starts.is_empty() || n.is_ascendancy_start {
                continue;
            }
            if n.is_ascendancy() {
                counts.ascendancy += 1;
            } else {
                counts.normal += 1;
            }
        }
        counts
    }

    /// Marks nodes whose name or stat lines contain `query` (case-insensitive) as highlighted
    /// and clears the mark everywhere else. A blank query clears every highlight.
    ///
    /// Returns the number of matches.
    pub fn highlight_matching(&mut self, query: &str) -> usize {
        let needle = query.trim().to_lowercase();
        let mut matches = 0;
        for node in self.nodes.values_mut() {
            let hit = !needle.is_empty()
                && (node.name.to_lowercase().contains(&needle)
                    || node
                        .stats
                        .iter()
                        .any(|s| s.to_lowercase().contains(&needle)));
            if hit {
                node.set_state(NodeStates::HIGHLIGHTED);
                matches += 1;
            } else {
                node.clear_state(NodeStates::HIGHLIGHTED);
            }
        }
        matches
    }
}
