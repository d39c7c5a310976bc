// Log cluster search: bounded 26-neighbor flood fill from the broken log.
//
// `find_log_cluster()` collects every block of the seed's material reachable
// from the seed through 26-adjacent steps, subject to two bounds:
//
// - **Radius.** A neighbor whose Manhattan distance from the *seed* exceeds
//   `max_radius` is skipped without being marked visited. The distance is
//   always measured from the seed, never along the path, so a block skipped
//   from one side is still in play if it turns up again.
// - **Size.** Admitting a block that would take the cluster past `max_size`
//   aborts the search with `ClusterTooLarge`. A returned cluster therefore
//   never exceeds `max_size`.
//
// While scanning, the search also notes whether any in-radius neighbor is a
// leaf. That flag feeds the natural-tree check in `classify.rs`, which only
// runs its own exhaustive scan when the flag is still false.
//
// See also: `classify.rs`, `remover.rs` (consumes `LogCluster`),
// `leaf_decay.rs` (seeds its own search from the cluster).
//
// **Critical constraint: determinism.** FIFO queue, `BTreeSet` visited-set and
// the fixed `NEIGHBOR_OFFSETS` order make the discovery order reproducible.

use crate::config::ChopConfig;
use crate::debug_trace;
use crate::error::ClusterTooLarge;
use crate::types::{Material, VoxelCoord};
use crate::world::BlockWorld;
use std::collections::{BTreeSet, VecDeque};

/// A connected set of same-material logs discovered from a seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogCluster {
    seed: VoxelCoord,
    material: Material,
    /// Discovery (BFS) order; `members[0]` is the seed.
    members: Vec<VoxelCoord>,
    /// Same coordinates as `members`, for lookups.
    index: BTreeSet<VoxelCoord>,
    /// An in-radius neighbor of some member was a leaf.
    leaf_adjacent: bool,
}

impl LogCluster {
    pub fn seed(&self) -> VoxelCoord {
        self.seed
    }

    pub fn material(&self) -> Material {
        self.material
    }

    /// Members in discovery order, seed first.
    pub fn members(&self) -> &[VoxelCoord] {
        &self.members
    }

    /// Members other than the seed, in discovery order.
    pub fn non_seed_members(&self) -> &[VoxelCoord] {
        &self.members[1..]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a cluster contains at least its seed.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.index.contains(&coord)
    }

    /// Whether the search itself already saw a leaf next to the cluster.
    pub fn leaf_adjacent(&self) -> bool {
        self.leaf_adjacent
    }
}

/// Breadth-first search for logs of `target` material connected to `seed`.
///
/// The seed is always a member, whatever its material.
pub fn find_log_cluster(
    world: &impl BlockWorld,
    seed: VoxelCoord,
    target: Material,
    max_size: u32,
    max_radius: u32,
    config: &ChopConfig,
) -> Result<LogCluster, ClusterTooLarge> {
    let max_size_usize = max_size as usize;
    if max_size == 0 {
        debug_trace!(config, "Tree exceeds max size ({max_size}). Aborting chop.");
        return Err(ClusterTooLarge { max_size });
    }

    let mut members = vec![seed];
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();
    visited.insert(seed);
    queue.push_back(seed);
    let mut leaf_adjacent = false;

    while let Some(current) = queue.pop_front() {
        for neighbor in current.neighbors() {
            if seed.manhattan_distance(neighbor) > max_radius {
                debug_trace!(config, "Neighbor exceeds search radius: {neighbor}");
                continue;
            }

            let material = world.material_at(neighbor);
            if material == target && !visited.contains(&neighbor) {
                if members.len() >= max_size_usize {
                    debug_trace!(config, "Tree exceeds max size ({max_size}). Aborting chop.");
                    return Err(ClusterTooLarge { max_size });
                }
                visited.insert(neighbor);
                members.push(neighbor);
                queue.push_back(neighbor);
                debug_trace!(config, "Found connected log: {neighbor}");
            } else if material.is_leaf() && !leaf_adjacent {
                debug_trace!(config, "Found adjacent leaves at {neighbor}, likely a natural tree.");
                leaf_adjacent = true;
            }
        }
    }

    Ok(LogCluster {
        seed,
        material: target,
        members,
        index: visited,
        leaf_adjacent,
    })
}
