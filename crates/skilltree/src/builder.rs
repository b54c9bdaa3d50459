//! Graph construction: id resolution, edge repair, node instantiation.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::config::BuildOptions;
use crate::error::{Error, Result};
use crate::geometry::OrbitTable;
use crate::graph::{Bounds, SkillTree};
use crate::node::{NodeId, SkillNode};
use crate::raw::{RawGroup, RawNode, RawTree};
use crate::state::NodeStates;

/// Declared adjacency of one node, before repair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclaredEdges {
    pub mastery: bool,
    pub out: Vec<NodeId>,
}

/// Repaired adjacency of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    pub out: BTreeSet<NodeId>,
    pub inbound: BTreeSet<NodeId>,
}

/// Makes non-mastery adjacency symmetric.
///
/// Reads only the declared lists and writes into fresh sets, so the result does not depend on
/// the order nodes are visited in. Mastery nodes keep exactly their declared `out` and an empty
/// `inbound`; a node pointing at a mastery records it in its own `inbound` but the mastery is
/// never linked back.
///
/// Fails on the first neighbor id that is not a key of `declared`.
pub fn repair_edges(
    declared: &IndexMap<NodeId, DeclaredEdges>,
) -> Result<(FxHashMap<NodeId, Adjacency>, usize)> {
    let mut adj: FxHashMap<NodeId, Adjacency> = FxHashMap::default();
    for (&id, edges) in declared {
        for &n in &edges.out {
            if !declared.contains_key(&n) {
                return Err(Error::MissingNeighbor {
                    node: id,
                    neighbor: n,
                });
            }
        }
        adj.insert(
            id,
            Adjacency {
                out: edges.out.iter().copied().collect(),
                inbound: BTreeSet::new(),
            },
        );
    }

    let is_mastery = |id: NodeId| declared.get(&id).is_some_and(|e| e.mastery);
    let mut added = 0usize;
    let mut link = |adj: &mut FxHashMap<NodeId, Adjacency>, from: NodeId, to: NodeId| {
        if let Some(a) = adj.get_mut(&from) {
            a.inbound.insert(to);
            if a.out.insert(to) {
                added += 1;
            }
        }
    };

    for (&a, edges) in declared {
        if edges.mastery {
            continue;
        }
        for &b in &edges.out {
            if let Some(node) = adj.get_mut(&a) {
                node.inbound.insert(b);
            }
            if !is_mastery(b) {
                link(&mut adj, b, a);
            }
        }
    }

    // Close `inbound` into `out`. Collected first so no set is read while it is being extended.
    let mut pending = Vec::new();
    for (&a, edges) in declared {
        if edges.mastery {
            continue;
        }
        if let Some(node) = adj.get(&a) {
            pending.extend(
                node.inbound
                    .iter()
                    .filter(|c| !node.out.contains(c))
                    .map(|&c| (a, c)),
            );
        }
    }
    for (a, c) in pending {
        if let Some(node) = adj.get_mut(&a) {
            if node.out.insert(c) {
                added += 1;
            }
        }
        if !is_mastery(c) {
            if let Some(node) = adj.get_mut(&c) {
                node.inbound.insert(a);
            }
        }
    }

    Ok((adj, added))
}

/// The numeric payload key is the node id. Records under a non-numeric key fall back to `id`,
/// then to the legacy `skill` alias.
fn resolve_id(key: &str, raw: &RawNode) -> Option<NodeId> {
    key.trim().parse().ok().or(raw.id).or(raw.skill)
}

fn resolve_groups(groups: &IndexMap<String, RawGroup>) -> FxHashMap<u32, RawGroup> {
    groups
        .iter()
        .filter_map(|(k, g)| k.trim().parse::<u32>().ok().map(|id| (id, *g)))
        .collect()
}

/// Builds a graph from a tree payload.
///
/// Any integrity problem (missing neighbor, missing group, duplicate id, and in strict mode a
/// missing orbit radius) rejects the whole load.
pub fn build(raw: RawTree, options: &BuildOptions) -> Result<SkillTree> {
    let _span = tracing::info_span!("build_skill_tree", records = raw.nodes.len()).entered();

    let RawTree {
        nodes: raw_nodes,
        groups,
        constants,
        min_x,
        min_y,
        max_x,
        max_y,
        image_zoom_levels,
    } = raw;

    let mut records: IndexMap<NodeId, RawNode> = IndexMap::with_capacity(raw_nodes.len());
    let mut skipped = 0usize;
    for (key, node) in raw_nodes {
        let Some(id) = resolve_id(&key, &node) else {
            tracing::debug!(key = %key, "skipping node record without a numeric id");
            skipped += 1;
            continue;
        };
        if records.insert(id, node).is_some() {
            return Err(Error::DuplicateNode { id });
        }
    }

    let declared: IndexMap<NodeId, DeclaredEdges> = records
        .iter()
        .map(|(&id, node)| {
            (
                id,
                DeclaredEdges {
                    mastery: node.is_mastery.or(node.m).unwrap_or(false),
                    out: node.out.clone(),
                },
            )
        })
        .collect();
    let (mut adjacency, repaired) = repair_edges(&declared)?;

    let groups = resolve_groups(&groups);
    let orbits = OrbitTable::from_constants(&constants);
    let scale = options
        .scale
        .or_else(|| image_zoom_levels.last().copied())
        .unwrap_or(1.0);

    let mut nodes: IndexMap<NodeId, SkillNode> = IndexMap::with_capacity(records.len());
    for (id, record) in records {
        let group = match record.group.or(record.g) {
            Some(gid) => Some(
                *groups
                    .get(&gid)
                    .ok_or(Error::MissingGroup { node: id, group: gid })?,
            ),
            None => None,
        };
        let orbit = record.orbit.or(record.o).unwrap_or(0);
        if group.is_some() && orbits.radius(orbit).is_none() {
            if !options.lenient_layout {
                return Err(Error::MissingOrbit {
                    node: id,
                    orbit,
                    radii: orbits.radii().len(),
                });
            }
            tracing::warn!(node = id, orbit, "orbit missing from radius table; placing node at origin");
        }

        let mut node = SkillNode::from_raw(id, record, group, &orbits, scale);
        if let Some(adj) = adjacency.remove(&id) {
            node.out = adj.out;
            node.inbound = adj.inbound;
        }
        if options
            .start_class
            .is_some_and(|class| node.class_starts.contains(&class))
        {
            node.set_state(NodeStates::ACTIVE);
        }
        nodes.insert(id, node);
    }

    tracing::debug!(
        nodes = nodes.len(),
        skipped,
        repaired_edges = repaired,
        scale,
        "skill tree built"
    );

    Ok(SkillTree::new(
        nodes,
        Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        },
        scale,
        orbits,
    ))
}
