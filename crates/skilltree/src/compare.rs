use crate::graph::SkillTree;
use crate::state::NodeStates;

/// Positions closer than this are the same slot.
const POSITION_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareSummary {
    pub shared: usize,
    pub moved: usize,
    pub only_here: usize,
    pub only_there: usize,
}

impl SkillTree {
    /// Flags every node that also exists in `other` as compared, and as moved when the two
    /// versions place it differently. Clears both flags on the remaining nodes.
    ///
    /// `other` is only read; the trees keep separate id spaces and share no state.
    pub fn mark_compared(&mut self, other: &SkillTree) -> CompareSummary {
        let mut summary = CompareSummary::default();
        for node in self.nodes.values_mut() {
            node.clear_state(NodeStates::COMPARED | NodeStates::MOVED);
            let Some(there) = other.node(node.id) else {
                summary.only_here += 1;
                continue;
            };
            node.set_state(NodeStates::COMPARED);
            summary.shared += 1;
            let delta = node.position() - there.position();
            if delta.x.abs() > POSITION_EPSILON || delta.y.abs() > POSITION_EPSILON {
                node.set_state(NodeStates::MOVED);
                summary.moved += 1;
            }
        }
        summary.only_there = other.nodes().filter(|n| !self.contains(n.id)).count();
        summary
    }
}
