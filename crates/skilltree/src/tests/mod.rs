use crate::*;
use serde_json::Value;

mod comparison;

pub(crate) fn try_tree(value: Value, options: BuildOptions) -> Result<SkillTree> {
    let raw: RawTree = serde_json::from_value(value).unwrap();
    SkillTree::build(raw, &options)
}

pub(crate) fn tree(value: Value) -> SkillTree {
    try_tree(value, BuildOptions::default()).unwrap()
}

pub(crate) fn ids<'a>(set: impl IntoIterator<Item = &'a NodeId>) -> Vec<NodeId> {
    set.into_iter().copied().collect()
}

pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
