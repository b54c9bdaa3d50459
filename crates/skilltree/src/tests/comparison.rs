use super::tree;
use crate::*;
use serde_json::{Value, json};

fn version(nodes: Value) -> SkillTree {
    tree(json!({
        "nodes": nodes,
        "groups": { "1": { "x": 0.0, "y": 0.0 } },
        "constants": { "orbitRadii": [0.0, 82.0], "skillsPerOrbit": [1, 6] },
    }))
}

#[test]
fn marks_shared_and_moved_nodes() {
    let mut current = version(json!({
        "1": { "skill": 1, "group": 1, "orbit": 0, "out": [2] },
        "2": { "skill": 2, "group": 1, "orbit": 1, "orbitIndex": 0, "out": [] },
        "3": { "skill": 3, "group": 1, "orbit": 1, "orbitIndex": 3, "out": [] },
    }));
    let previous = version(json!({
        "1": { "skill": 1, "group": 1, "orbit": 0, "out": [] },
        "2": { "skill": 2, "group": 1, "orbit": 1, "orbitIndex": 2, "out": [] },
        "9": { "skill": 9, "group": 1, "orbit": 0, "out": [] },
    }));
    let previous_before = previous.clone();

    let summary = current.mark_compared(&previous);
    assert_eq!(
        summary,
        CompareSummary {
            shared: 2,
            moved: 1,
            only_here: 1,
            only_there: 1,
        }
    );

    assert!(current.has_state(1, NodeStates::COMPARED).unwrap());
    assert!(!current.has_state(1, NodeStates::MOVED).unwrap());
    assert!(current.has_state(2, NodeStates::COMPARED | NodeStates::MOVED).unwrap());
    assert!(!current.has_state(3, NodeStates::COMPARED).unwrap());

    assert_eq!(previous, previous_before);
}

#[test]
fn remarking_clears_stale_flags() {
    let mut current = version(json!({ "1": { "skill": 1, "group": 1, "orbit": 0, "out": [] } }));
    let with_node = version(json!({ "1": { "skill": 1, "group": 1, "orbit": 1, "out": [] } }));
    let without_node = version(json!({}));

    current.mark_compared(&with_node);
    assert!(current.has_state(1, NodeStates::COMPARED | NodeStates::MOVED).unwrap());

    current.mark_compared(&without_node);
    assert!(!current.has_state(1, NodeStates::COMPARED).unwrap());
    assert!(!current.has_state(1, NodeStates::MOVED).unwrap());
}
