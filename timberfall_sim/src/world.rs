// Block access seam and the reference dense voxel grid.
//
// `BlockWorld` is the narrow interface the felling core calls through: read a
// block's material, break it naturally with a tool, clear it silently, and
// read/write leaf decay state. Hosts embedding the core implement it over
// their own chunk storage; `VoxelWorld` is the in-crate implementation used
// by the tick-loop sim, the `chop` binary and the tests.
//
// `VoxelWorld` stores blocks in a flat `Vec<Block>` indexed by
// `x + z * size_x + y * size_x * size_z`. Out-of-bounds reads return `Air`;
// out-of-bounds writes are no-ops. A protected-coordinate set stands in for
// region protection: `break_naturally` refuses those blocks. Every natural
// break is appended to a drop log so callers can see what a drop handler
// would have spawned.
//
// See also: `types.rs` for `Material` / `LeafState`, `tree_gen.rs` for
// populating the grid, `sim.rs` which owns a `VoxelWorld`.
//
// **Critical constraint: determinism.** No interior mutability; all writes
// come from the sim thread through `&mut self`.

use crate::types::{LeafState, Material, ToolStack, VoxelCoord};
use std::collections::BTreeSet;

/// World operations the felling core needs.
pub trait BlockWorld {
    fn material_at(&self, coord: VoxelCoord) -> Material;

    /// Remove a block as if mined, running drop logic for `tool`. Returns
    /// `false` if the host refused (protection, air, out of bounds).
    fn break_naturally(&mut self, coord: VoxelCoord, tool: Option<&ToolStack>) -> bool;

    /// Replace a block with air: no drops, no tool effects.
    fn set_empty(&mut self, coord: VoxelCoord);

    /// Decay state of a leaf block, `None` for anything else.
    fn leaf_state(&self, coord: VoxelCoord) -> Option<LeafState>;

    /// Overwrite a leaf's decay state and notify the host's block update.
    /// No-op for non-leaf blocks.
    fn set_leaf_state(&mut self, coord: VoxelCoord, state: LeafState);
}

/// A single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Block {
    pub material: Material,
    /// Present exactly when `material` is a leaf.
    pub leaf: Option<LeafState>,
}

/// One item drop produced by a natural break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemDrop {
    pub coord: VoxelCoord,
    pub material: Material,
    pub tool: Option<ToolStack>,
}

/// Dense 3D block grid.
#[derive(Clone, Debug, Default)]
pub struct VoxelWorld {
    /// Flat storage: index = x + z * size_x + y * size_x * size_z.
    blocks: Vec<Block>,
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
    /// Coordinates whose natural break is refused.
    protected: BTreeSet<VoxelCoord>,
    /// Every natural break, in order.
    drops: Vec<ItemDrop>,
    /// Number of leaf state writes (host block updates) so far.
    leaf_updates: usize,
}

impl VoxelWorld {
    /// Create a new world filled with `Air`.
    pub fn new(size_x: u32, size_y: u32, size_z: u32) -> Self {
        let total = (size_x as usize) * (size_y as usize) * (size_z as usize);
        Self {
            blocks: vec![Block::default(); total],
            size_x,
            size_y,
            size_z,
            protected: BTreeSet::new(),
            drops: Vec::new(),
            leaf_updates: 0,
        }
    }

    pub fn in_bounds(&self, coord: VoxelCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.z >= 0
            && (coord.x as u32) < self.size_x
            && (coord.y as u32) < self.size_y
            && (coord.z as u32) < self.size_z
    }

    fn index(&self, coord: VoxelCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            let x = coord.x as usize;
            let y = coord.y as usize;
            let z = coord.z as usize;
            let sx = self.size_x as usize;
            let sz = self.size_z as usize;
            Some(x + z * sx + y * sx * sz)
        } else {
            None
        }
    }

    /// Read a block. Returns an air block out of bounds.
    pub fn get(&self, coord: VoxelCoord) -> Block {
        self.index(coord)
            .map(|i| self.blocks[i])
            .unwrap_or_default()
    }

    /// Place a material. Leaves get natural decay state (non-persistent,
    /// touching a log); use `set_leaf` for anything else.
    pub fn set(&mut self, coord: VoxelCoord, material: Material) {
        let leaf = material.is_leaf().then(LeafState::natural);
        if let Some(i) = self.index(coord) {
            self.blocks[i] = Block { material, leaf };
        }
    }

    /// Place a leaf block with explicit decay state. Ignores non-leaf materials.
    pub fn set_leaf(&mut self, coord: VoxelCoord, material: Material, state: LeafState) {
        if !material.is_leaf() {
            return;
        }
        if let Some(i) = self.index(coord) {
            self.blocks[i] = Block {
                material,
                leaf: Some(state),
            };
        }
    }

    /// Refuse natural breaks at `coord` from now on.
    pub fn protect(&mut self, coord: VoxelCoord) {
        self.protected.insert(coord);
    }

    pub fn drops(&self) -> &[ItemDrop] {
        &self.drops
    }

    pub fn leaf_updates(&self) -> usize {
        self.leaf_updates
    }

    /// Count blocks of the given material in the whole grid.
    pub fn count(&self, material: Material) -> usize {
        self.blocks.iter().filter(|b| b.material == material).count()
    }
}

impl BlockWorld for VoxelWorld {
    fn material_at(&self, coord: VoxelCoord) -> Material {
        self.get(coord).material
    }

    fn break_naturally(&mut self, coord: VoxelCoord, tool: Option<&ToolStack>) -> bool {
        if self.protected.contains(&coord) {
            return false;
        }
        let Some(i) = self.index(coord) else {
            return false;
        };
        let material = self.blocks[i].material;
        if material == Material::Air {
            return false;
        }
        self.blocks[i] = Block::default();
        self.drops.push(ItemDrop {
            coord,
            material,
            tool: tool.copied(),
        });
        true
    }

    fn set_empty(&mut self, coord: VoxelCoord) {
        if let Some(i) = self.index(coord) {
            self.blocks[i] = Block::default();
        }
    }

    fn leaf_state(&self, coord: VoxelCoord) -> Option<LeafState> {
        self.get(coord).leaf
    }

    fn set_leaf_state(&mut self, coord: VoxelCoord, state: LeafState) {
        if let Some(i) = self.index(coord)
            && self.blocks[i].material.is_leaf()
        {
            self.blocks[i].leaf = Some(state);
            self.leaf_updates += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemType;

    #[test]
    fn new_world_is_all_air() {
        let world = VoxelWorld::new(4, 4, 4);
        assert_eq!(world.count(Material::Air), 64);
    }

    #[test]
    fn set_and_get() {
        let mut world = VoxelWorld::new(8, 8, 8);
        let coord = VoxelCoord::new(3, 5, 2);
        world.set(coord, Material::OakLog);
        assert_eq!(world.material_at(coord), Material::OakLog);
        assert_eq!(world.material_at(VoxelCoord::new(3, 5, 3)), Material::Air);
        assert_eq!(world.leaf_state(coord), None);
    }

    #[test]
    fn out_of_bounds_read_is_air_and_write_is_noop() {
        let mut world = VoxelWorld::new(4, 4, 4);
        world.set(VoxelCoord::new(-1, 0, 0), Material::OakLog);
        world.set(VoxelCoord::new(100, 0, 0), Material::OakLog);
        assert_eq!(world.material_at(VoxelCoord::new(-1, 0, 0)), Material::Air);
        assert_eq!(world.material_at(VoxelCoord::new(0, 4, 0)), Material::Air);
        assert_eq!(world.count(Material::OakLog), 0);
    }

    #[test]
    fn leaves_carry_natural_state() {
        let mut world = VoxelWorld::new(4, 4, 4);
        let c = VoxelCoord::new(1, 1, 1);
        world.set(c, Material::OakLeaves);
        assert_eq!(world.leaf_state(c), Some(LeafState::natural()));

        world.set_leaf(c, Material::OakLeaves, LeafState::placed());
        assert_eq!(world.leaf_state(c), Some(LeafState::placed()));

        // Non-leaf materials are ignored by set_leaf.
        world.set_leaf(c, Material::OakLog, LeafState::placed());
        assert_eq!(world.material_at(c), Material::OakLeaves);
    }

    #[test]
    fn break_naturally_records_a_drop() {
        let mut world = VoxelWorld::new(4, 4, 4);
        let c = VoxelCoord::new(2, 1, 2);
        world.set(c, Material::BirchLog);
        let axe = ToolStack::new(ItemType::StoneAxe);
        assert!(world.break_naturally(c, Some(&axe)));
        assert_eq!(world.material_at(c), Material::Air);
        assert_eq!(world.drops().len(), 1);
        assert_eq!(world.drops()[0].material, Material::BirchLog);
        assert_eq!(world.drops()[0].tool, Some(axe));
    }

    #[test]
    fn break_naturally_refuses_air_protected_and_out_of_bounds() {
        let mut world = VoxelWorld::new(4, 4, 4);
        let c = VoxelCoord::new(1, 1, 1);
        assert!(!world.break_naturally(c, None));

        world.set(c, Material::OakLog);
        world.protect(c);
        assert!(!world.break_naturally(c, None));
        assert_eq!(world.material_at(c), Material::OakLog);

        assert!(!world.break_naturally(VoxelCoord::new(9, 9, 9), None));
        assert!(world.drops().is_empty());
    }

    #[test]
    fn set_empty_leaves_no_drop() {
        let mut world = VoxelWorld::new(4, 4, 4);
        let c = VoxelCoord::new(1, 1, 1);
        world.set(c, Material::OakLog);
        world.protect(c);
        world.set_empty(c);
        assert_eq!(world.material_at(c), Material::Air);
        assert!(world.drops().is_empty());
    }

    #[test]
    fn set_leaf_state_only_touches_leaves() {
        let mut world = VoxelWorld::new(4, 4, 4);
        let leaf = VoxelCoord::new(1, 1, 1);
        let log = VoxelCoord::new(2, 1, 1);
        world.set(leaf, Material::SpruceLeaves);
        world.set(log, Material::SpruceLog);

        let decaying = LeafState {
            persistent: false,
            distance: 7,
        };
        world.set_leaf_state(leaf, decaying);
        world.set_leaf_state(log, decaying);
        assert_eq!(world.leaf_state(leaf), Some(decaying));
        assert_eq!(world.leaf_state(log), None);
        assert_eq!(world.leaf_updates(), 1);
    }
}
