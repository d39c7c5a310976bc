// Core types shared across the crate.
//
// Defines the grid coordinate (`VoxelCoord`), the closed set of block
// materials with their capability tag (`BlockKind`), per-leaf state, held
// items (`ItemType` / `ToolStack` with their `ToolKind` tag) and player IDs.
//
// Block and tool capabilities are expressed as tags matched at the call site
// (`Material::kind()`, `ItemType::kind()`), so no code inspects a block's
// runtime type to decide whether it is a leaf or whether a tool can wear.
//
// **Critical constraint: determinism.** `VoxelCoord` is totally ordered so the
// traversal visited-sets can be `BTreeSet`s; neighbor enumeration order is
// fixed by `NEIGHBOR_OFFSETS`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// The 26 offsets of the 3x3x3 neighborhood minus its center, in nested
/// dx → dy → dz order over {-1, 0, 1}.
pub const NEIGHBOR_OFFSETS: [(i32, i32, i32); 26] = {
    let mut out = [(0, 0, 0); 26];
    let mut i = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if !(dx == 0 && dy == 0 && dz == 0) {
                    out[i] = (dx, dy, dz);
                    i += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    out
};

/// A position in the voxel grid, in block units. Y is up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Manhattan distance between two coordinates.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        ((self.x - other.x).unsigned_abs())
            + ((self.y - other.y).unsigned_abs())
            + ((self.z - other.z).unsigned_abs())
    }

    /// The coordinate displaced by `(dx, dy, dz)`.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// All 26 neighbors, in `NEIGHBOR_OFFSETS` order.
    pub fn neighbors(self) -> impl Iterator<Item = VoxelCoord> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy, dz)| self.offset(dx, dy, dz))
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// Capability tag of a material, as far as tree felling cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Log,
    Leaf,
    Other,
}

/// The material of a single block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Material {
    #[default]
    Air,
    Dirt,
    GrassBlock,
    Stone,
    OakPlanks,
    OakLog,
    SpruceLog,
    BirchLog,
    JungleLog,
    AcaciaLog,
    DarkOakLog,
    OakLeaves,
    SpruceLeaves,
    BirchLeaves,
    JungleLeaves,
    AcaciaLeaves,
    DarkOakLeaves,
}

impl Material {
    pub fn kind(self) -> BlockKind {
        match self {
            Material::OakLog
            | Material::SpruceLog
            | Material::BirchLog
            | Material::JungleLog
            | Material::AcaciaLog
            | Material::DarkOakLog => BlockKind::Log,
            Material::OakLeaves
            | Material::SpruceLeaves
            | Material::BirchLeaves
            | Material::JungleLeaves
            | Material::AcaciaLeaves
            | Material::DarkOakLeaves => BlockKind::Leaf,
            Material::Air
            | Material::Dirt
            | Material::GrassBlock
            | Material::Stone
            | Material::OakPlanks => BlockKind::Other,
        }
    }

    pub fn is_log(self) -> bool {
        self.kind() == BlockKind::Log
    }

    pub fn is_leaf(self) -> bool {
        self.kind() == BlockKind::Leaf
    }
}

// ---------------------------------------------------------------------------
// Leaf state
// ---------------------------------------------------------------------------

/// Distance value meaning "no log within reach": a non-persistent leaf at
/// this distance decays on the host's next random update.
pub const MAX_LEAF_DISTANCE: u8 = 7;

/// Decay-relevant state carried by every leaf block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafState {
    /// Player-placed leaves never decay.
    pub persistent: bool,
    /// Steps to the nearest log, capped at `MAX_LEAF_DISTANCE`.
    pub distance: u8,
}

impl LeafState {
    /// A freshly grown leaf touching a log.
    pub const fn natural() -> Self {
        Self {
            persistent: false,
            distance: 1,
        }
    }

    /// A leaf placed by a player.
    pub const fn placed() -> Self {
        Self {
            persistent: true,
            distance: MAX_LEAF_DISTANCE,
        }
    }
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// Capability tag of a held item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    /// Durable and eligible for the chop-through wear simulation.
    Axe,
    /// Takes wear from ordinary breaks but is not an axe.
    Durable,
    /// Never wears out.
    NonDurable,
}

/// Item types a player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    WoodenAxe,
    StoneAxe,
    IronAxe,
    GoldenAxe,
    DiamondAxe,
    NetheriteAxe,
    Shears,
    Stick,
}

impl ItemType {
    pub fn kind(self) -> ToolKind {
        match self {
            ItemType::WoodenAxe
            | ItemType::StoneAxe
            | ItemType::IronAxe
            | ItemType::GoldenAxe
            | ItemType::DiamondAxe
            | ItemType::NetheriteAxe => ToolKind::Axe,
            ItemType::Shears => ToolKind::Durable,
            ItemType::Stick => ToolKind::NonDurable,
        }
    }

    /// Uses before the item breaks. Zero for non-durable items.
    pub fn max_durability(self) -> u32 {
        match self {
            ItemType::WoodenAxe => 59,
            ItemType::StoneAxe => 131,
            ItemType::IronAxe => 250,
            ItemType::GoldenAxe => 32,
            ItemType::DiamondAxe => 1561,
            ItemType::NetheriteAxe => 2031,
            ItemType::Shears => 238,
            ItemType::Stick => 0,
        }
    }

    /// Parse the snake_case item name used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "wooden_axe" => ItemType::WoodenAxe,
            "stone_axe" => ItemType::StoneAxe,
            "iron_axe" => ItemType::IronAxe,
            "golden_axe" => ItemType::GoldenAxe,
            "diamond_axe" => ItemType::DiamondAxe,
            "netherite_axe" => ItemType::NetheriteAxe,
            "shears" => ItemType::Shears,
            "stick" => ItemType::Stick,
            _ => return None,
        })
    }
}

/// A held item: its type, accumulated damage and Unbreaking level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolStack {
    pub item: ItemType,
    pub damage: u32,
    pub unbreaking: u32,
}

impl ToolStack {
    pub fn new(item: ItemType) -> Self {
        Self {
            item,
            damage: 0,
            unbreaking: 0,
        }
    }

    pub fn with_unbreaking(mut self, level: u32) -> Self {
        self.unbreaking = level;
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    pub fn kind(&self) -> ToolKind {
        self.item.kind()
    }

    pub fn is_axe(&self) -> bool {
        self.kind() == ToolKind::Axe
    }

    pub fn is_durable(&self) -> bool {
        self.kind() != ToolKind::NonDurable
    }

    pub fn max_durability(&self) -> u32 {
        self.item.max_durability()
    }

    /// `true` once accumulated damage has used up the whole durability.
    pub fn is_worn_out(&self) -> bool {
        self.is_durable() && self.damage >= self.max_durability()
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Compact player identifier, assigned sequentially by the host sim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

/// Game mode of a player. Creative players never trigger tree felling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
}
