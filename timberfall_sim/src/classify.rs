// Natural-tree check: tells grown trees apart from player-stacked logs.
//
// A cluster counts as a natural tree when some member touches a leaf. The
// cluster search already records whether it saw a leaf within its radius;
// when it did not, `classify()` re-scans the 26 neighbors of every member
// with no radius bound, since the search radius may have cut off the canopy.
// The re-scan is bounded by the cluster size and stops at the first leaf.
//
// Rules, in order:
//   1. `check-for-leaves` off          → Proceed.
//   2. search flag already set         → Proceed.
//   3. more than one member, no flag   → re-scan; Proceed on a hit,
//                                        AbortAsPlayerMade otherwise.
//   4. single member, no flag          → ProceedSingleBlock (the host's own
//                                        single-block break is all that happens).

use crate::cluster::LogCluster;
use crate::config::ChopConfig;
use crate::debug_trace;
use crate::world::BlockWorld;
use serde::{Deserialize, Serialize};

/// What the orchestrator should do with a discovered cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Fell the whole cluster.
    Proceed,
    /// No leaves anywhere around the cluster: leave it standing.
    AbortAsPlayerMade,
    /// A lone log with no leaves: nothing beyond the host's default break.
    ProceedSingleBlock,
}

pub fn classify(
    world: &impl BlockWorld,
    cluster: &LogCluster,
    check_leaves: bool,
    config: &ChopConfig,
) -> Decision {
    if !check_leaves || cluster.leaf_adjacent() {
        return Decision::Proceed;
    }

    if cluster.len() > 1 {
        if touches_leaves(world, cluster) {
            debug_trace!(config, "Leaf check passed during secondary scan.");
            Decision::Proceed
        } else {
            debug_trace!(
                config,
                "No leaves found connected to the log structure. Assuming player-placed, cancelling chop."
            );
            Decision::AbortAsPlayerMade
        }
    } else {
        debug_trace!(config, "Only one log found and no leaves nearby. Normal break.");
        Decision::ProceedSingleBlock
    }
}

/// Exhaustive scan: does any member have a leaf among its 26 neighbors?
fn touches_leaves(world: &impl BlockWorld, cluster: &LogCluster) -> bool {
    cluster
        .members()
        .iter()
        .any(|m| m.neighbors().any(|n| world.material_at(n).is_leaf()))
}
