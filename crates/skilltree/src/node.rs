//! Skill tree node entity.

use std::collections::BTreeSet;

use crate::classify::{
    self, Classification, ConnectionType, DrawType, FrameAsset, SpriteKey, TargetCategory,
};
use crate::error::ClassificationGap;
use crate::geometry::{OrbitTable, Point, Size};
use crate::raw::{RawExpansionJewel, RawGroup, RawMasteryEffect, RawNode};
use crate::state::NodeStates;

pub type NodeId = u32;

#[derive(Debug, Clone, PartialEq)]
pub struct MasteryEffect {
    pub effect: u32,
    pub stats: Vec<String>,
}

impl From<RawMasteryEffect> for MasteryEffect {
    fn from(value: RawMasteryEffect) -> Self {
        Self {
            effect: value.effect,
            stats: value.stats,
        }
    }
}

/// Cluster jewel socket descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionJewel {
    pub size: u32,
    pub index: u32,
    pub proxy: Option<String>,
    pub parent: Option<String>,
}

impl From<RawExpansionJewel> for ExpansionJewel {
    fn from(value: RawExpansionJewel) -> Self {
        Self {
            size: value.size,
            index: value.index,
            proxy: value.proxy,
            parent: value.parent,
        }
    }
}

/// One passive skill node.
///
/// Descriptive attributes are fixed at construction. Only the [`NodeStates`] bitmask changes
/// afterwards, and only through explicit set/clear calls.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillNode {
    pub id: NodeId,
    /// Legacy skill hash aliasing `id`; `None` when the record only carries `id`.
    pub skill: Option<u32>,
    pub name: String,
    pub icon: String,
    pub active_icon: String,
    pub inactive_icon: String,
    pub active_effect_image: String,
    pub mastery_effects: Vec<MasteryEffect>,

    pub is_keystone: bool,
    pub is_notable: bool,
    pub is_mastery: bool,
    pub is_blighted: bool,
    pub is_jewel_socket: bool,
    pub is_multiple_choice: bool,
    pub is_multiple_choice_option: bool,
    pub is_proxy: bool,
    pub is_ascendancy_start: bool,
    pub expansion_jewel: Option<ExpansionJewel>,
    /// Empty when the node is not ascendancy specific.
    pub ascendancy_name: String,
    pub passive_points_granted: u32,

    /// Classes that start on this node.
    pub class_starts: Vec<u32>,
    pub class_start_index: Option<u32>,

    pub stats: Vec<String>,
    pub reminder_text: Vec<String>,
    pub flavour_text: Vec<String>,

    pub granted_strength: i32,
    pub granted_dexterity: i32,
    pub granted_intelligence: i32,

    pub group: Option<u32>,
    pub in_proxy_group: bool,
    pub orbit: usize,
    pub orbit_index: usize,

    pub(crate) out: BTreeSet<NodeId>,
    pub(crate) inbound: BTreeSet<NodeId>,

    state: NodeStates,
    arc: f64,
    position: Point,
    scale: f64,
    is_regular: bool,
    is_attribute: bool,
}

impl SkillNode {
    /// Builds a node from its payload record.
    ///
    /// `group` is the resolved owning group (if any); adjacency is left empty and filled in by
    /// the builder after edge repair.
    pub fn from_raw(
        id: NodeId,
        raw: RawNode,
        group: Option<RawGroup>,
        orbits: &OrbitTable,
        scale: f64,
    ) -> Self {
        let orbit = raw.orbit.or(raw.o).unwrap_or(0);
        let orbit_index = raw.orbit_index.or(raw.oidx).unwrap_or(0);
        let arc = orbits.arc(orbit, orbit_index);
        let position = orbits.position(
            group.map(|g| crate::geometry::point(g.x, g.y)),
            orbit,
            orbit_index,
            scale,
        );

        let is_keystone = raw.is_keystone.or(raw.ks).unwrap_or(false);
        let is_notable = raw.is_notable.or(raw.not).unwrap_or(false);
        let is_mastery = raw.is_mastery.or(raw.m).unwrap_or(false);
        let granted_strength = raw.granted_strength.or(raw.sa).unwrap_or(0);
        let granted_dexterity = raw.granted_dexterity.or(raw.da).unwrap_or(0);
        let granted_intelligence = raw.granted_intelligence.or(raw.ia).unwrap_or(0);
        let mut stats = raw.stats.or(raw.sd).unwrap_or_default();

        let is_regular = !is_keystone && !is_notable && !raw.is_jewel_socket && !is_mastery;
        let is_attribute = is_regular
            && (granted_strength > 0 || granted_dexterity > 0 || granted_intelligence > 0)
            && stats.iter().filter(|s| !s.trim().is_empty()).count() == 1;

        // Appended after the regular/attribute checks.
        if raw.passive_points_granted > 0 {
            let n = raw.passive_points_granted;
            stats.push(format!(
                "Grants {n} Passive Skill Point{}",
                if n > 1 { "s" } else { "" }
            ));
        }

        let class_start_index = raw
            .class_start_index
            .or_else(|| raw.spc.first().copied());

        Self {
            id,
            skill: raw.skill,
            name: raw.name.or(raw.dn).unwrap_or_default(),
            icon: raw.icon.unwrap_or_default(),
            active_icon: raw.active_icon.unwrap_or_default(),
            inactive_icon: raw.inactive_icon.unwrap_or_default(),
            active_effect_image: raw.active_effect_image.unwrap_or_default(),
            mastery_effects: raw.mastery_effects.into_iter().map(Into::into).collect(),
            is_keystone,
            is_notable,
            is_mastery,
            is_blighted: raw.is_blighted,
            is_jewel_socket: raw.is_jewel_socket,
            is_multiple_choice: raw.is_multiple_choice,
            is_multiple_choice_option: raw.is_multiple_choice_option,
            is_proxy: raw.is_proxy,
            is_ascendancy_start: raw.is_ascendancy_start,
            expansion_jewel: raw.expansion_jewel.map(Into::into),
            ascendancy_name: raw.ascendancy_name.unwrap_or_default(),
            passive_points_granted: raw.passive_points_granted,
            class_starts: if raw.spc.is_empty() {
                class_start_index.into_iter().collect()
            } else {
                raw.spc
            },
            class_start_index,
            stats,
            reminder_text: raw.reminder_text,
            flavour_text: raw.flavour_text,
            granted_strength,
            granted_dexterity,
            granted_intelligence,
            group: raw.group.or(raw.g),
            in_proxy_group: group.is_some_and(|g| g.is_proxy),
            orbit,
            orbit_index,
            out: BTreeSet::new(),
            inbound: BTreeSet::new(),
            state: NodeStates::empty(),
            arc,
            position,
            scale,
            is_regular,
            is_attribute,
        }
    }

    pub fn state(&self) -> NodeStates {
        self.state
    }

    pub fn has_state(&self, flags: NodeStates) -> bool {
        self.state.is(flags)
    }

    pub fn set_state(&mut self, flags: NodeStates) {
        self.state.insert(flags);
    }

    pub fn clear_state(&mut self, flags: NodeStates) {
        self.state.remove(flags);
    }

    pub fn is_active(&self) -> bool {
        self.has_state(NodeStates::ACTIVE)
    }

    /// Connected neighbor ids (after edge repair).
    pub fn out(&self) -> &BTreeSet<NodeId> {
        &self.out
    }

    pub fn inbound(&self) -> &BTreeSet<NodeId> {
        &self.inbound
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn arc(&self) -> f64 {
        self.arc
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_ascendancy(&self) -> bool {
        !self.ascendancy_name.is_empty()
    }

    /// No keystone, notable, jewel socket or mastery flag.
    pub fn is_regular(&self) -> bool {
        self.is_regular
    }

    /// Regular node granting an attribute through a single stat line.
    pub fn is_attribute_node(&self) -> bool {
        self.is_attribute
    }

    /// Proxy node, node in a proxy group, or cluster jewel socket.
    pub fn is_proxy_like(&self) -> bool {
        self.expansion_jewel.is_some() || self.is_proxy || self.in_proxy_group
    }

    pub fn icon(&self) -> &str {
        if self.is_mastery {
            if self.is_active() && !self.active_icon.is_empty() {
                return &self.active_icon;
            }
            if !self.inactive_icon.is_empty() {
                return &self.inactive_icon;
            }
        }
        &self.icon
    }

    pub fn draw_type<'a>(&self, neighbors: impl IntoIterator<Item = &'a SkillNode>) -> DrawType {
        classify::draw_type(self, neighbors)
    }

    pub fn frame_asset(&self, draw_type: DrawType) -> Option<FrameAsset> {
        classify::frame_asset(self, draw_type)
    }

    pub fn sprite_key(&self) -> SpriteKey {
        classify::sprite_key(self)
    }

    pub fn target_category(&self) -> Result<TargetCategory, ClassificationGap> {
        classify::target_category(self)
    }

    pub fn target_size(&self) -> Size {
        classify::target_size(self)
    }

    pub fn connection_type(&self, other: &SkillNode) -> ConnectionType {
        classify::connection_type(self, other)
    }

    /// Full render classification given the node's neighbor views.
    pub fn classify<'a>(&self, neighbors: impl IntoIterator<Item = &'a SkillNode>) -> Classification {
        classify::classify(self, neighbors)
    }
}
