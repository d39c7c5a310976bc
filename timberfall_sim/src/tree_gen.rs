// Tree planting for demos, tests and benchmarks.
//
// `plant_tree()` places a straight trunk of `trunk_height` logs above `base`
// and a rounded canopy around the trunk top: every air cell within
// `canopy_radius` (Manhattan) of the top log becomes a leaf. Cells on the
// outer shell are kept with probability `leaf_density`, which thins the
// outline the way grown canopies look ragged. Interior cells are always
// placed, so the canopy always touches the trunk.
//
// Leaves are natural (non-persistent) and carry the Manhattan distance to the
// nearest trunk log, capped at `MAX_LEAF_DISTANCE`.
//
// See also: `world.rs` for the grid being populated, `sim.rs` which runs the
// felling on the planted world.
//
// **Critical constraint: determinism.** All randomness comes from the
// `TickRng` passed by the caller, drawn in a fixed x → y → z cell order.

use crate::prng::TickRng;
use crate::types::{LeafState, Material, VoxelCoord, MAX_LEAF_DISTANCE};
use crate::world::{BlockWorld, VoxelWorld};
use serde::{Deserialize, Serialize};

/// Shape parameters of a planted tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeProfile {
    pub log: Material,
    pub leaves: Material,
    pub trunk_height: u32,
    pub canopy_radius: u32,
    /// Chance that a cell on the canopy's outer shell gets a leaf.
    pub leaf_density: f64,
}

impl TreeProfile {
    pub fn oak() -> Self {
        Self {
            log: Material::OakLog,
            leaves: Material::OakLeaves,
            trunk_height: 5,
            canopy_radius: 2,
            leaf_density: 0.6,
        }
    }

    /// Taller and sparser than oak.
    pub fn birch() -> Self {
        Self {
            log: Material::BirchLog,
            leaves: Material::BirchLeaves,
            trunk_height: 7,
            canopy_radius: 2,
            leaf_density: 0.5,
        }
    }

    pub fn spruce() -> Self {
        Self {
            log: Material::SpruceLog,
            leaves: Material::SpruceLeaves,
            trunk_height: 9,
            canopy_radius: 3,
            leaf_density: 0.75,
        }
    }

    /// Look up a preset by name (`oak`, `birch`, `spruce`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "oak" => Some(Self::oak()),
            "birch" => Some(Self::birch()),
            "spruce" => Some(Self::spruce()),
            _ => None,
        }
    }
}

/// Voxels placed by `plant_tree()`.
#[derive(Clone, Debug, Default)]
pub struct PlantedTree {
    /// Bottom to top; `log_voxels[0]` is the base.
    pub log_voxels: Vec<VoxelCoord>,
    pub leaf_voxels: Vec<VoxelCoord>,
}

pub fn plant_tree(
    world: &mut VoxelWorld,
    base: VoxelCoord,
    profile: &TreeProfile,
    rng: &mut TickRng,
) -> PlantedTree {
    let mut tree = PlantedTree::default();

    // --- Trunk ---
    for dy in 0..profile.trunk_height as i32 {
        let coord = base.offset(0, dy, 0);
        if !world.in_bounds(coord) {
            break;
        }
        world.set(coord, profile.log);
        tree.log_voxels.push(coord);
    }
    let Some(&top) = tree.log_voxels.last() else {
        return tree;
    };

    // --- Canopy ---
    let r = profile.canopy_radius as i32;
    for dx in -r..=r {
        for dy in -r..=r {
            for dz in -r..=r {
                let coord = top.offset(dx, dy, dz);
                let shell = top.manhattan_distance(coord);
                if shell > profile.canopy_radius
                    || coord.y < base.y
                    || !world.in_bounds(coord)
                    || world.material_at(coord) != Material::Air
                {
                    continue;
                }
                if shell == profile.canopy_radius && !rng.random_bool(profile.leaf_density) {
                    continue;
                }
                let distance = tree
                    .log_voxels
                    .iter()
                    .map(|&log| log.manhattan_distance(coord))
                    .min()
                    .unwrap_or(u32::from(MAX_LEAF_DISTANCE))
                    .min(u32::from(MAX_LEAF_DISTANCE)) as u8;
                world.set_leaf(
                    coord,
                    profile.leaves,
                    LeafState {
                        persistent: false,
                        distance,
                    },
                );
                tree.leaf_voxels.push(coord);
            }
        }
    }

    tree
}

/// Fill the whole `y` plane with `material`.
pub fn fill_floor(world: &mut VoxelWorld, y: i32, material: Material) {
    for x in 0..world.size_x as i32 {
        for z in 0..world.size_z as i32 {
            world.set(VoxelCoord::new(x, y, z), material);
        }
    }
}
