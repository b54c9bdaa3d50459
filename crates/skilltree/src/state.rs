//! Per-node interaction state.

use bitflags::bitflags;
use serde::Serialize;
use serde::ser::SerializeSeq;

bitflags! {
    /// Independent, composable node flags.
    ///
    /// A node can carry any combination at once (e.g. hovered while on a
    /// preview path). A fresh node starts with no flag set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeStates: u8 {
        /// Allocated as part of the build.
        const ACTIVE = 1 << 0;
        const HOVERED = 1 << 1;
        /// On the transient preview path between the cursor and the allocated tree.
        const PATHING = 1 << 2;
        /// Matched by the current search.
        const HIGHLIGHTED = 1 << 3;
        /// Present in the comparison tree.
        const COMPARED = 1 << 4;
        /// Present in the comparison tree at a different position.
        const MOVED = 1 << 5;
    }
}

impl NodeStates {
    /// `true` when every flag in `test` is set.
    pub fn is(self, test: NodeStates) -> bool {
        self.contains(test)
    }
}

impl Serialize for NodeStates {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        for (name, _) in self.iter_names() {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::NodeStates;

    #[test]
    fn flags_compose_independently() {
        let mut s = NodeStates::empty();
        s.insert(NodeStates::HOVERED);
        s.insert(NodeStates::PATHING);
        assert!(s.is(NodeStates::HOVERED));
        assert!(s.is(NodeStates::PATHING));
        assert!(s.is(NodeStates::HOVERED | NodeStates::PATHING));
        assert!(!s.is(NodeStates::ACTIVE));

        s.remove(NodeStates::HOVERED);
        assert!(!s.is(NodeStates::HOVERED));
        assert!(s.is(NodeStates::PATHING));
    }

    #[test]
    fn serializes_as_flag_names() {
        let s = NodeStates::ACTIVE | NodeStates::HIGHLIGHTED;
        assert_eq!(
            serde_json::to_value(s).unwrap(),
            serde_json::json!(["ACTIVE", "HIGHLIGHTED"])
        );
    }
}
