//! Tree payload schema as published per game version.
//!
//! Node records exist in two generations of field names (`ks` vs `isKeystone`, `g` vs `group`,
//! ...). Both are accepted here and resolved in [`crate::node::SkillNode::from_raw`], modern
//! names winning when a record carries both.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTree {
    pub nodes: IndexMap<String, RawNode>,
    pub groups: IndexMap<String, RawGroup>,
    pub constants: RawConstants,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    #[serde(rename = "imageZoomLevels")]
    pub image_zoom_levels: Vec<f64>,
}

impl RawTree {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawGroup {
    pub x: f64,
    pub y: f64,
    pub is_proxy: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConstants {
    pub orbit_radii: Vec<f64>,
    pub skills_per_orbit: Vec<usize>,
    /// Explicit per-orbit slot angles in radians. Derived from `skillsPerOrbit` when absent.
    pub orbit_angles: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawNode {
    pub skill: Option<u32>,
    pub id: Option<u32>,

    pub name: Option<String>,
    pub dn: Option<String>,
    pub icon: Option<String>,
    pub active_icon: Option<String>,
    pub inactive_icon: Option<String>,
    pub active_effect_image: Option<String>,
    pub mastery_effects: Vec<RawMasteryEffect>,

    pub is_keystone: Option<bool>,
    pub ks: Option<bool>,
    pub is_notable: Option<bool>,
    pub not: Option<bool>,
    pub is_mastery: Option<bool>,
    pub m: Option<bool>,
    pub is_blighted: bool,
    pub is_jewel_socket: bool,
    pub expansion_jewel: Option<RawExpansionJewel>,
    pub is_multiple_choice: bool,
    pub is_multiple_choice_option: bool,
    pub is_proxy: bool,
    pub passive_points_granted: u32,
    pub ascendancy_name: Option<String>,
    pub is_ascendancy_start: bool,

    pub spc: Vec<u32>,
    pub class_start_index: Option<u32>,

    pub stats: Option<Vec<String>>,
    pub sd: Option<Vec<String>>,
    pub reminder_text: Vec<String>,
    pub flavour_text: Vec<String>,

    pub group: Option<u32>,
    pub g: Option<u32>,
    pub orbit: Option<usize>,
    pub o: Option<usize>,
    pub orbit_index: Option<usize>,
    pub oidx: Option<usize>,

    pub granted_strength: Option<i32>,
    pub sa: Option<i32>,
    pub granted_dexterity: Option<i32>,
    pub da: Option<i32>,
    pub granted_intelligence: Option<i32>,
    pub ia: Option<i32>,

    #[serde(deserialize_with = "deserialize_ids")]
    pub out: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMasteryEffect {
    pub effect: u32,
    pub stats: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawExpansionJewel {
    pub size: u32,
    pub index: u32,
    pub proxy: Option<String>,
    pub parent: Option<String>,
}

/// Neighbor ids are numbers in older payloads and numeric strings in newer ones.
fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(u32),
        Str(String),
    }

    let ids = Vec::<Id>::deserialize(deserializer)?;
    ids.into_iter()
        .map(|id| match id {
            Id::Num(n) => Ok(n),
            Id::Str(s) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| serde::de::Error::custom(format!("invalid node id `{s}`"))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::RawTree;
    use serde_json::json;

    #[test]
    fn accepts_numeric_and_string_neighbor_ids() {
        let tree: RawTree = serde_json::from_value(json!({
            "nodes": {
                "1": { "skill": 1, "out": [2, "3"] },
            }
        }))
        .unwrap();
        assert_eq!(tree.nodes["1"].out, vec![2, 3]);
    }

    #[test]
    fn rejects_non_numeric_neighbor_ids() {
        let res: Result<RawTree, _> = serde_json::from_value(json!({
            "nodes": { "1": { "skill": 1, "out": ["abc"] } }
        }));
        assert!(res.is_err());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let tree = RawTree::from_json("{}").unwrap();
        assert!(tree.nodes.is_empty());
        assert!(tree.groups.is_empty());
        assert!(tree.constants.orbit_radii.is_empty());
        assert!(tree.image_zoom_levels.is_empty());
    }
}
