use skilltree::{
    BuildOptions, ConnectionType, DrawType, NodeStates, SkillTree, TreeOptions,
};
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> String {
    let path = repo_root().join("fixtures").join("skilltree").join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("fixture missing: {}: {e}", path.display()))
}

fn options() -> TreeOptions {
    TreeOptions::from_json(&fixture("sample_opts.json")).unwrap()
}

fn load() -> SkillTree {
    let opts = BuildOptions::default().with_tree_options(&options());
    SkillTree::from_json(&fixture("sample_tree.json"), &opts).unwrap()
}

#[test]
fn fixture_loads_with_start_class_allocated() {
    let t = load();
    assert_eq!(t.len(), 11);
    assert_eq!(t.scale(), 0.3835);
    assert_eq!(t.width(), 2500.0);
    assert_eq!(t.height(), 1900.0);

    let skilled: Vec<u32> = t.skilled_nodes().iter().map(|n| n.id).collect();
    assert_eq!(skilled, vec![200]);
}

#[test]
fn fixture_adjacency_is_symmetric_except_masteries() {
    let t = load();
    for a in t.nodes().filter(|n| !n.is_mastery) {
        for b in t.nodes().filter(|n| !n.is_mastery) {
            assert_eq!(a.out().contains(&b.id), b.out().contains(&a.id));
            assert_eq!(a.inbound().contains(&b.id), b.inbound().contains(&a.id));
        }
    }

    let mastery = t.node(104).unwrap();
    assert!(mastery.inbound().is_empty());
    assert!(!t.node(105).unwrap().inbound().contains(&104));
    assert!(!t.node(105).unwrap().out().contains(&104));
}

#[test]
fn fixture_rebuild_is_identical() {
    assert_eq!(load(), load());
}

#[test]
fn fixture_classification_follows_allocation() {
    let mut t = load();
    assert_eq!(
        t.classify(103).unwrap().frame.map(|f| f.key()).as_deref(),
        Some("KeystoneFrameUnallocated")
    );

    t.set_state(101, NodeStates::ACTIVE).unwrap();
    let keystone = t.classify(103).unwrap();
    assert_eq!(keystone.draw_type, DrawType::CanAllocate);
    assert_eq!(
        keystone.frame.map(|f| f.key()).as_deref(),
        Some("KeystoneFrameCanAllocate")
    );

    let socket = t.classify(106).unwrap();
    assert_eq!(
        socket.frame.map(|f| f.key()).as_deref(),
        Some("JewelSocketAltNormal")
    );

    let proxy = t.classify(107).unwrap();
    assert_eq!(proxy.draw_type, DrawType::Normal);

    let mastery = t.classify(104).unwrap();
    assert_eq!(mastery.frame, None);
    assert_eq!(mastery.sprite.as_str(), "masteryInactive");
}

#[test]
fn fixture_connections_skip_masteries_and_ascendancy_boundary() {
    let mut t = load();
    t.set_state(100, NodeStates::ACTIVE).unwrap();
    t.set_state(101, NodeStates::ACTIVE).unwrap();

    let conns = t.connections();
    let pairs: Vec<(u32, u32)> = conns.iter().map(|c| (c.a, c.b)).collect();
    assert_eq!(
        pairs,
        vec![
            (100, 101),
            (100, 102),
            (101, 103),
            (102, 103),
            (103, 105),
            (105, 106),
            (106, 107),
            (201, 202),
        ]
    );
    assert_eq!(conns[0].kind, ConnectionType::Active);
    assert_eq!(conns[1].kind, ConnectionType::Intermediate);
    assert_eq!(conns[4].kind, ConnectionType::Normal);
}

#[test]
fn fixture_supplemented_attributes() {
    let t = load();
    assert!(
        t.node(202)
            .unwrap()
            .stats
            .contains(&"Grants 1 Passive Skill Point".to_string())
    );
    assert!(t.node(101).unwrap().is_attribute_node());
    assert_eq!(t.node(104).unwrap().mastery_effects[0].effect, 9001);
    assert_eq!(
        options().ascendancy_names(1),
        vec!["Juggernaut", "Berserker", "Chieftain"]
    );

    let p = t.node(101).unwrap().position();
    assert!((p.x - 0.0).abs() < 1e-9);
    assert!((p.y + 162.0 * 0.3835).abs() < 1e-9);
}

#[test]
fn fixture_compares_against_a_shifted_version() {
    let mut current = load();
    let mut raw: serde_json::Value = serde_json::from_str(&fixture("sample_tree.json")).unwrap();
    raw["nodes"]["105"]["orbitIndex"] = serde_json::json!(5);
    raw["nodes"].as_object_mut().unwrap().remove("202");
    raw["nodes"]["201"]["out"] = serde_json::json!([]);
    let previous = SkillTree::from_json(&raw.to_string(), &BuildOptions::default()).unwrap();

    let summary = current.mark_compared(&previous);
    assert_eq!(summary.shared, 10);
    assert_eq!(summary.moved, 1);
    assert_eq!(summary.only_here, 1);
    assert_eq!(summary.only_there, 0);
    assert!(current.has_state(105, NodeStates::MOVED).unwrap());
}
