//! Render classification of nodes and connections.
//!
//! Every decision is an ordered table of `(predicate, result)` rules evaluated first-match-wins
//! over a small `Copy` snapshot of the inputs. The tables are the precedence contract: reordering
//! entries changes behavior.

use std::fmt;

use serde::Serialize;

use crate::error::ClassificationGap;
use crate::geometry::{Size, size};
use crate::node::SkillNode;
use crate::state::NodeStates;

/// One entry of a classification table.
pub struct Rule<I, T> {
    pub name: &'static str,
    pub when: fn(I) -> bool,
    pub then: fn(I) -> T,
}

/// Evaluates `rules` in order and returns the name and result of the first match.
pub fn first_match<I: Copy, T>(rules: &[Rule<I, T>], input: I) -> Option<(&'static str, T)> {
    rules
        .iter()
        .find(|rule| (rule.when)(input))
        .map(|rule| (rule.name, (rule.then)(input)))
}

/// Attribute and state facts of a node that the tables read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeTraits {
    pub keystone: bool,
    pub notable: bool,
    pub mastery: bool,
    pub jewel_socket: bool,
    pub blighted: bool,
    pub ascendancy: bool,
    pub ascendancy_start: bool,
    pub proxy_like: bool,
    pub regular: bool,
    pub attribute: bool,
    pub has_effect_image: bool,
    pub state: NodeStates,
}

impl NodeTraits {
    pub fn of(node: &SkillNode) -> Self {
        Self {
            keystone: node.is_keystone,
            notable: node.is_notable,
            mastery: node.is_mastery,
            jewel_socket: node.is_jewel_socket,
            blighted: node.is_blighted,
            ascendancy: node.is_ascendancy(),
            ascendancy_start: node.is_ascendancy_start,
            proxy_like: node.is_proxy_like(),
            regular: node.is_regular(),
            attribute: node.is_attribute_node(),
            has_effect_image: !node.active_effect_image.is_empty(),
            state: node.state(),
        }
    }

    fn active(self) -> bool {
        self.state.is(NodeStates::ACTIVE)
    }

    fn hovered(self) -> bool {
        self.state.is(NodeStates::HOVERED)
    }

    fn pathing(self) -> bool {
        self.state.is(NodeStates::PATHING)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawType {
    Allocated,
    Active,
    CanAllocate,
    Unallocated,
    Normal,
}

impl DrawType {
    pub fn as_str(self) -> &'static str {
        match self {
            DrawType::Allocated => "Allocated",
            DrawType::Active => "Active",
            DrawType::CanAllocate => "CanAllocate",
            DrawType::Unallocated => "Unallocated",
            DrawType::Normal => "Normal",
        }
    }
}

/// Frame art drawn behind a node icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameAsset {
    AscendancyMiddle,
    JewelSocketAlt(DrawType),
    JewelFrame(DrawType),
    KeystoneFrame(DrawType),
    BlightedNotableFrame(DrawType),
    NotableFrame(DrawType),
    AscendancyFrameLarge(DrawType),
    AscendancyFrameSmall(DrawType),
    SkillFrame,
    SkillFrameHighlighted,
    SkillFrameActive,
}

impl FrameAsset {
    /// Asset key as named in the tree's asset table.
    pub fn key(self) -> String {
        match self {
            FrameAsset::AscendancyMiddle => "AscendancyMiddle".to_string(),
            FrameAsset::JewelSocketAlt(d) => format!("JewelSocketAlt{d}"),
            FrameAsset::JewelFrame(d) => format!("JewelFrame{d}"),
            FrameAsset::KeystoneFrame(d) => format!("KeystoneFrame{d}"),
            FrameAsset::BlightedNotableFrame(d) => format!("BlightedNotableFrame{d}"),
            FrameAsset::NotableFrame(d) => format!("NotableFrame{d}"),
            FrameAsset::AscendancyFrameLarge(d) => format!("AscendancyFrameLarge{d}"),
            FrameAsset::AscendancyFrameSmall(d) => format!("AscendancyFrameSmall{d}"),
            FrameAsset::SkillFrame => "PSSkillFrame".to_string(),
            FrameAsset::SkillFrameHighlighted => "PSSkillFrameHighlighted".to_string(),
            FrameAsset::SkillFrameActive => "PSSkillFrameActive".to_string(),
        }
    }
}

/// Key into the skill sprite sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    KeystoneActive,
    KeystoneInactive,
    NotableActive,
    NotableInactive,
    MasteryActiveSelected,
    MasteryConnected,
    MasteryInactive,
    MasteryActive,
    Mastery,
    NormalActive,
    NormalInactive,
}

impl SpriteKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SpriteKey::KeystoneActive => "keystoneActive",
            SpriteKey::KeystoneInactive => "keystoneInactive",
            SpriteKey::NotableActive => "notableActive",
            SpriteKey::NotableInactive => "notableInactive",
            SpriteKey::MasteryActiveSelected => "masteryActiveSelected",
            SpriteKey::MasteryConnected => "masteryConnected",
            SpriteKey::MasteryInactive => "masteryInactive",
            SpriteKey::MasteryActive => "masteryActive",
            SpriteKey::Mastery => "mastery",
            SpriteKey::NormalActive => "normalActive",
            SpriteKey::NormalInactive => "normalInactive",
        }
    }

    fn normal(active: bool) -> Self {
        if active {
            SpriteKey::NormalActive
        } else {
            SpriteKey::NormalInactive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    Active,
    Intermediate,
    Normal,
}

impl ConnectionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionType::Active => "Active",
            ConnectionType::Intermediate => "Intermediate",
            ConnectionType::Normal => "Normal",
        }
    }
}

/// Hit-box tier. `Notable` also covers jewel sockets and masteries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetCategory {
    Regular,
    Notable,
    Keystone,
}

impl TargetCategory {
    /// Unscaled hit-box dimensions.
    pub fn base_size(self) -> (f64, f64) {
        match self {
            TargetCategory::Regular => (70.0, 70.0),
            TargetCategory::Notable => (100.0, 100.0),
            TargetCategory::Keystone => (138.0, 140.0),
        }
    }
}

macro_rules! display_via_str {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    )*};
}

display_via_str!(DrawType, SpriteKey, ConnectionType);

impl fmt::Display for FrameAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl Serialize for FrameAsset {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// (node, any out-neighbor active)
pub type DrawInput = (NodeTraits, bool);

pub const DRAW_TYPE_RULES: &[Rule<DrawInput, DrawType>] = &[
    Rule {
        name: "self allocated or hovered, proxy-like",
        when: |(n, _)| (n.active() || n.hovered()) && n.proxy_like,
        then: |_| DrawType::Active,
    },
    Rule {
        name: "self allocated or hovered",
        when: |(n, _)| n.active() || n.hovered(),
        then: |_| DrawType::Allocated,
    },
    Rule {
        name: "neighbor allocated",
        when: |(_, neighbor_active)| neighbor_active,
        then: |_| DrawType::CanAllocate,
    },
    Rule {
        name: "ascendancy or proxy-like",
        when: |(n, _)| n.ascendancy || n.proxy_like,
        then: |_| DrawType::Normal,
    },
    Rule {
        name: "unallocated",
        when: |_| true,
        then: |_| DrawType::Unallocated,
    },
];

pub type FrameInput = (NodeTraits, DrawType);

pub const FRAME_RULES: &[Rule<FrameInput, Option<FrameAsset>>] = &[
    Rule {
        name: "ascendancy start",
        when: |(n, _)| n.ascendancy_start,
        then: |_| Some(FrameAsset::AscendancyMiddle),
    },
    Rule {
        name: "proxy-like jewel socket",
        when: |(n, _)| n.jewel_socket && n.proxy_like,
        then: |(_, d)| Some(FrameAsset::JewelSocketAlt(d)),
    },
    Rule {
        name: "jewel socket",
        when: |(n, _)| n.jewel_socket,
        then: |(_, d)| Some(FrameAsset::JewelFrame(d)),
    },
    Rule {
        name: "keystone",
        when: |(n, _)| n.keystone,
        then: |(_, d)| Some(FrameAsset::KeystoneFrame(d)),
    },
    Rule {
        name: "blighted notable",
        when: |(n, _)| n.notable && !n.ascendancy && n.blighted,
        then: |(_, d)| Some(FrameAsset::BlightedNotableFrame(d)),
    },
    Rule {
        name: "notable",
        when: |(n, _)| n.notable && !n.ascendancy,
        then: |(_, d)| Some(FrameAsset::NotableFrame(d)),
    },
    Rule {
        name: "ascendancy notable",
        when: |(n, _)| n.notable && n.ascendancy,
        then: |(_, d)| Some(FrameAsset::AscendancyFrameLarge(d)),
    },
    Rule {
        name: "mastery",
        when: |(n, _)| n.mastery,
        then: |_| None,
    },
    Rule {
        name: "ascendancy",
        when: |(n, _)| n.ascendancy,
        then: |(_, d)| Some(FrameAsset::AscendancyFrameSmall(d)),
    },
    Rule {
        name: "unallocated frame",
        when: |(_, d)| matches!(d, DrawType::Normal | DrawType::Unallocated),
        then: |_| Some(FrameAsset::SkillFrame),
    },
    Rule {
        name: "can allocate frame",
        when: |(_, d)| d == DrawType::CanAllocate,
        then: |_| Some(FrameAsset::SkillFrameHighlighted),
    },
    Rule {
        name: "allocated frame",
        when: |(_, d)| matches!(d, DrawType::Active | DrawType::Allocated),
        then: |_| Some(FrameAsset::SkillFrameActive),
    },
];

pub const SPRITE_RULES: &[Rule<NodeTraits, SpriteKey>] = &[
    Rule {
        name: "keystone",
        when: |n| n.keystone,
        then: |n| {
            if n.active() {
                SpriteKey::KeystoneActive
            } else {
                SpriteKey::KeystoneInactive
            }
        },
    },
    Rule {
        name: "notable",
        when: |n| n.notable,
        then: |n| {
            if n.active() {
                SpriteKey::NotableActive
            } else {
                SpriteKey::NotableInactive
            }
        },
    },
    Rule {
        name: "selected mastery effect",
        when: |n| n.mastery && n.has_effect_image && (n.active() || n.hovered()),
        then: |_| SpriteKey::MasteryActiveSelected,
    },
    Rule {
        name: "connected mastery effect",
        when: |n| n.mastery && n.has_effect_image && (n.hovered() || n.pathing()),
        then: |_| SpriteKey::MasteryConnected,
    },
    Rule {
        name: "inactive mastery effect",
        when: |n| n.mastery && n.has_effect_image,
        then: |_| SpriteKey::MasteryInactive,
    },
    Rule {
        name: "active mastery",
        when: |n| n.mastery && (n.active() || n.hovered()),
        then: |_| SpriteKey::MasteryActive,
    },
    Rule {
        name: "mastery",
        when: |n| n.mastery,
        then: |_| SpriteKey::Mastery,
    },
    Rule {
        name: "normal",
        when: |_| true,
        then: |n| SpriteKey::normal(n.active()),
    },
];

pub const TARGET_RULES: &[Rule<NodeTraits, TargetCategory>] = &[
    Rule {
        name: "regular",
        when: |n| n.attribute || n.regular,
        then: |_| TargetCategory::Regular,
    },
    Rule {
        name: "notable, jewel socket or mastery",
        when: |n| n.notable || n.jewel_socket || n.mastery,
        then: |_| TargetCategory::Notable,
    },
    Rule {
        name: "keystone",
        when: |n| n.keystone,
        then: |_| TargetCategory::Keystone,
    },
];

pub const CONNECTION_RULES: &[Rule<(NodeStates, NodeStates), ConnectionType>] = &[
    Rule {
        name: "both allocated",
        when: |(a, b)| a.is(NodeStates::ACTIVE) && b.is(NodeStates::ACTIVE),
        then: |_| ConnectionType::Active,
    },
    Rule {
        name: "one allocated",
        when: |(a, b)| a.is(NodeStates::ACTIVE) || b.is(NodeStates::ACTIVE),
        then: |_| ConnectionType::Intermediate,
    },
    Rule {
        name: "both pathing",
        when: |(a, b)| a.is(NodeStates::PATHING) && b.is(NodeStates::PATHING),
        then: |_| ConnectionType::Intermediate,
    },
    Rule {
        name: "normal",
        when: |_| true,
        then: |_| ConnectionType::Normal,
    },
];

pub fn draw_type<'a>(node: &SkillNode, neighbors: impl IntoIterator<Item = &'a SkillNode>) -> DrawType {
    let neighbor_active = neighbors.into_iter().any(SkillNode::is_active);
    first_match(DRAW_TYPE_RULES, (NodeTraits::of(node), neighbor_active))
        .map(|(_, d)| d)
        .unwrap_or(DrawType::Unallocated)
}

pub fn frame_asset_checked(
    node: &SkillNode,
    draw_type: DrawType,
    rules: &[Rule<FrameInput, Option<FrameAsset>>],
) -> Result<Option<FrameAsset>, ClassificationGap> {
    first_match(rules, (NodeTraits::of(node), draw_type))
        .map(|(_, f)| f)
        .ok_or(ClassificationGap {
            node: node.id,
            table: "frame",
        })
}

/// Frame from `rules`; no frame when nothing matches.
pub fn frame_asset_in(
    node: &SkillNode,
    draw_type: DrawType,
    rules: &[Rule<FrameInput, Option<FrameAsset>>],
) -> Option<FrameAsset> {
    frame_asset_checked(node, draw_type, rules).unwrap_or_else(|gap| {
        report_gap(&gap);
        None
    })
}

pub fn frame_asset(node: &SkillNode, draw_type: DrawType) -> Option<FrameAsset> {
    frame_asset_in(node, draw_type, FRAME_RULES)
}

pub fn sprite_key_checked(
    node: &SkillNode,
    rules: &[Rule<NodeTraits, SpriteKey>],
) -> Result<SpriteKey, ClassificationGap> {
    first_match(rules, NodeTraits::of(node))
        .map(|(_, s)| s)
        .ok_or(ClassificationGap {
            node: node.id,
            table: "sprite",
        })
}

/// Sprite from `rules`; the generic active/inactive sprite when nothing matches.
pub fn sprite_key_in(node: &SkillNode, rules: &[Rule<NodeTraits, SpriteKey>]) -> SpriteKey {
    sprite_key_checked(node, rules).unwrap_or_else(|gap| {
        report_gap(&gap);
        SpriteKey::normal(node.is_active())
    })
}

pub fn sprite_key(node: &SkillNode) -> SpriteKey {
    sprite_key_in(node, SPRITE_RULES)
}

pub fn target_category_checked(
    node: &SkillNode,
    rules: &[Rule<NodeTraits, TargetCategory>],
) -> Result<TargetCategory, ClassificationGap> {
    first_match(rules, NodeTraits::of(node))
        .map(|(_, c)| c)
        .ok_or(ClassificationGap {
            node: node.id,
            table: "target size",
        })
}

pub fn target_category(node: &SkillNode) -> Result<TargetCategory, ClassificationGap> {
    target_category_checked(node, TARGET_RULES)
}

/// Hit-box size from `rules`, scaled by the tree's zoom scale; zero-sized when nothing matches.
pub fn target_size_in(node: &SkillNode, rules: &[Rule<NodeTraits, TargetCategory>]) -> Size {
    match target_category_checked(node, rules) {
        Ok(category) => {
            let (w, h) = category.base_size();
            size((w * node.scale()).floor(), (h * node.scale()).floor())
        }
        Err(gap) => {
            report_gap(&gap);
            Size::zero()
        }
    }
}

pub fn target_size(node: &SkillNode) -> Size {
    target_size_in(node, TARGET_RULES)
}

pub fn connection_type(a: &SkillNode, b: &SkillNode) -> ConnectionType {
    first_match(CONNECTION_RULES, (a.state(), b.state()))
        .map(|(_, c)| c)
        .unwrap_or(ConnectionType::Normal)
}

/// Everything a renderer needs to draw one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub draw_type: DrawType,
    pub frame: Option<FrameAsset>,
    pub sprite: SpriteKey,
    pub target_size: Size,
}

pub fn classify<'a>(
    node: &SkillNode,
    neighbors: impl IntoIterator<Item = &'a SkillNode>,
) -> Classification {
    let draw_type = draw_type(node, neighbors);
    Classification {
        draw_type,
        frame: frame_asset(node, draw_type),
        sprite: sprite_key(node),
        target_size: target_size(node),
    }
}

fn report_gap(gap: &ClassificationGap) {
    tracing::warn!(node = gap.node, table = gap.table, "{gap}; using neutral default");
}
