// Leaf decay: finds the canopy of a felled tree and marks it to decay.
//
// Two halves, run a tick apart:
//
// 1. `find_decay_leaves()` (synchronous, right after removal). Seed phase:
//    every leaf among the 26 neighbors of any felled log. Expansion phase:
//    BFS through 26-adjacent leaves, admitting a leaf only if it lies within
//    `leaf_radius` (Manhattan) of at least one felled log. The radius test is
//    against the whole log set, not the log the chain started from. A leaf
//    that fails the test is not marked visited, so a later path may test it
//    again; a leaf is admitted at most once.
//
// 2. `weaken_leaves()` (deferred, see `sim.rs`). Re-reads each leaf, skips
//    anything that is no longer a leaf, clears persistence and pushes the
//    leaf's distance up to the decay distance so the host's own leaf update
//    removes it.
//
// The seed phase applies the same radius test as expansion. Adjacent leaves
// are at most 3 steps from their log, so for any radius of 3 or more this is
// the plain adjacency seed; for smaller radii it keeps every admitted leaf
// inside the radius. An unconditional seed would let a corner leaf 3 steps
// out past a radius of 1 or 2, and every weakened leaf must lie within
// `leaf_radius` of some felled log.
//
// See also: `chop.rs` which runs 1 and schedules 2, `event.rs` for the
// deferred-task plumbing.
//
// **Critical constraint: determinism.** `LeafSet` keeps admission order.

use crate::config::ChopConfig;
use crate::debug_trace;
use crate::types::{LeafState, VoxelCoord};
use crate::world::BlockWorld;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Leaves selected for weakening, in admission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafSet {
    leaves: Vec<VoxelCoord>,
}

impl LeafSet {
    /// Build a set from explicit coordinates. Duplicates are dropped, first
    /// occurrence kept.
    pub fn from_coords(coords: impl IntoIterator<Item = VoxelCoord>) -> Self {
        let mut seen = BTreeSet::new();
        let leaves = coords.into_iter().filter(|c| seen.insert(*c)).collect();
        Self { leaves }
    }

    pub fn as_slice(&self) -> &[VoxelCoord] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.leaves.contains(&coord)
    }
}

fn near_any_log(logs: &[VoxelCoord], coord: VoxelCoord, leaf_radius: u32) -> bool {
    logs.iter()
        .any(|&log| log.manhattan_distance(coord) <= leaf_radius)
}

/// Collect leaves connected to `logs` and within `leaf_radius` of them.
pub fn find_decay_leaves(
    world: &impl BlockWorld,
    logs: &[VoxelCoord],
    leaf_radius: u32,
    config: &ChopConfig,
) -> LeafSet {
    let mut leaves = Vec::new();
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();

    for &log in logs {
        for neighbor in log.neighbors() {
            if world.material_at(neighbor).is_leaf()
                && !visited.contains(&neighbor)
                && near_any_log(logs, neighbor, leaf_radius)
            {
                visited.insert(neighbor);
                leaves.push(neighbor);
                queue.push_back(neighbor);
                debug_trace!(config, "Added initial leaf: {neighbor}");
            }
        }
    }

    while let Some(current) = queue.pop_front() {
        for neighbor in current.neighbors() {
            if !world.material_at(neighbor).is_leaf() || visited.contains(&neighbor) {
                continue;
            }
            if near_any_log(logs, neighbor, leaf_radius) {
                visited.insert(neighbor);
                leaves.push(neighbor);
                queue.push_back(neighbor);
                debug_trace!(config, "Added connected leaf: {neighbor}");
            } else {
                debug_trace!(config, "Leaf too far from logs: {neighbor}");
            }
        }
    }

    debug_trace!(config, "Found {} leaves to decay.", leaves.len());
    LeafSet { leaves }
}

/// Mark every still-present leaf in `leaves` for decay. Returns how many
/// leaves were changed.
pub fn weaken_leaves(
    world: &mut impl BlockWorld,
    leaves: &LeafSet,
    decay_distance: u8,
    config: &ChopConfig,
) -> usize {
    let mut changed = 0;
    for &coord in leaves.as_slice() {
        if !world.material_at(coord).is_leaf() {
            continue;
        }
        let Some(state) = world.leaf_state(coord) else {
            continue;
        };
        if state.persistent || state.distance < decay_distance {
            world.set_leaf_state(
                coord,
                LeafState {
                    persistent: false,
                    distance: decay_distance,
                },
            );
            changed += 1;
        }
    }
    debug_trace!(config, "Marked {changed} leaves for faster decay.");
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Material, MAX_LEAF_DISTANCE};
    use crate::world::VoxelWorld;

    fn quiet() -> ChopConfig {
        ChopConfig::default()
    }

    #[test]
    fn adjacent_leaves_seed_the_set() {
        let mut world = VoxelWorld::new(8, 8, 8);
        let log = VoxelCoord::new(4, 2, 4);
        world.set(log.offset(1, 0, 0), Material::OakLeaves);
        world.set(log.offset(-1, 1, 1), Material::OakLeaves);
        world.set(log.offset(0, 0, 2), Material::Stone);

        let set = find_decay_leaves(&world, &[log], 7, &quiet());
        assert_eq!(set.len(), 2);
        assert!(set.contains(log.offset(1, 0, 0)));
        assert!(set.contains(log.offset(-1, 1, 1)));
    }

    #[test]
    fn chain_stops_at_radius() {
        // A straight leaf line leaving the log along +x.
        let mut world = VoxelWorld::new(16, 4, 4);
        let log = VoxelCoord::new(0, 1, 1);
        for x in 1..16 {
            world.set(VoxelCoord::new(x, 1, 1), Material::BirchLeaves);
        }
        let set = find_decay_leaves(&world, &[log], 5, &quiet());
        assert_eq!(set.len(), 5);
        for &leaf in set.as_slice() {
            assert!(log.manhattan_distance(leaf) <= 5);
        }
    }

    #[test]
    fn radius_is_measured_against_every_log() {
        // Two logs far apart on x; a leaf bridge links them. Each leaf is near
        // one of the logs even though the chain starts at the other.
        let mut world = VoxelWorld::new(16, 4, 4);
        let left = VoxelCoord::new(0, 1, 1);
        let right = VoxelCoord::new(10, 1, 1);
        for x in 1..10 {
            world.set(VoxelCoord::new(x, 1, 1), Material::OakLeaves);
        }
        let set = find_decay_leaves(&world, &[left, right], 5, &quiet());
        assert_eq!(set.len(), 9);

        let only_left = find_decay_leaves(&world, &[left], 5, &quiet());
        assert_eq!(only_left.len(), 5);
    }

    #[test]
    fn disconnected_leaves_are_ignored() {
        let mut world = VoxelWorld::new(8, 8, 8);
        let log = VoxelCoord::new(1, 1, 1);
        world.set(VoxelCoord::new(5, 5, 5), Material::OakLeaves);
        assert!(find_decay_leaves(&world, &[log], 7, &quiet()).is_empty());
    }

    #[test]
    fn small_radius_keeps_corner_leaves_out() {
        let mut world = VoxelWorld::new(4, 4, 4);
        let log = VoxelCoord::new(1, 1, 1);
        world.set(log.offset(1, 1, 1), Material::OakLeaves);
        world.set(log.offset(0, 1, 0), Material::OakLeaves);
        let set = find_decay_leaves(&world, &[log], 1, &quiet());
        assert_eq!(set.as_slice(), &[log.offset(0, 1, 0)]);
    }

    #[test]
    fn each_leaf_is_admitted_once() {
        let mut world = VoxelWorld::new(8, 8, 8);
        let logs = [VoxelCoord::new(3, 1, 3), VoxelCoord::new(3, 2, 3)];
        for x in 2..5 {
            for z in 2..5 {
                world.set(VoxelCoord::new(x, 3, z), Material::OakLeaves);
            }
        }
        let set = find_decay_leaves(&world, &logs, 7, &quiet());
        let unique: BTreeSet<_> = set.as_slice().iter().copied().collect();
        assert_eq!(unique.len(), set.len());
        assert_eq!(set.len(), 9);
    }

    #[test]
    fn explicit_sets_drop_duplicates() {
        let a = VoxelCoord::new(1, 2, 3);
        let b = VoxelCoord::new(3, 2, 1);
        let set = LeafSet::from_coords([a, b, a]);
        assert_eq!(set.as_slice(), &[a, b]);
    }

    #[test]
    fn weaken_clears_persistence_and_raises_distance() {
        let mut world = VoxelWorld::new(4, 4, 4);
        let placed = VoxelCoord::new(1, 1, 1);
        let natural = VoxelCoord::new(2, 1, 1);
        let far = VoxelCoord::new(3, 1, 1);
        world.set_leaf(placed, Material::OakLeaves, LeafState::placed());
        world.set(natural, Material::OakLeaves);
        world.set_leaf(
            far,
            Material::OakLeaves,
            LeafState {
                persistent: false,
                distance: MAX_LEAF_DISTANCE,
            },
        );
        let set = find_decay_leaves(&world, &[VoxelCoord::new(2, 2, 1)], 7, &quiet());
        assert_eq!(set.len(), 3);

        let changed = weaken_leaves(&mut world, &set, MAX_LEAF_DISTANCE, &quiet());
        assert_eq!(changed, 2);
        let decaying = LeafState {
            persistent: false,
            distance: MAX_LEAF_DISTANCE,
        };
        for c in [placed, natural, far] {
            assert_eq!(world.leaf_state(c), Some(decaying));
        }
        assert_eq!(world.leaf_updates(), 2);
    }

    #[test]
    fn weaken_skips_blocks_that_changed_since_the_search() {
        let mut world = VoxelWorld::new(4, 4, 4);
        let leaf = VoxelCoord::new(1, 1, 1);
        let log = VoxelCoord::new(1, 2, 1);
        world.set(leaf, Material::OakLeaves);
        let set = find_decay_leaves(&world, &[log], 7, &quiet());
        assert_eq!(set.len(), 1);

        // Replaced before the deferred step fires.
        world.set(leaf, Material::Stone);
        assert_eq!(weaken_leaves(&mut world, &set, MAX_LEAF_DISTANCE, &quiet()), 0);
        assert_eq!(world.material_at(leaf), Material::Stone);
    }
}
