// Tree felling orchestrator: the block-break entry point.
//
// `on_block_break()` is called by the host after a player breaks a block and
// before the host runs its own single-block break. It either fells the whole
// tree (and tells the host to skip its default) or does nothing at all.
//
// Pipeline:
//   1. gates: the block must be a log, the held item an axe when
//      `require-tool` is on, and the player not in creative mode;
//   2. `find_log_cluster()` from the broken block, target = its material;
//   3. `classify()` to veto player-built log piles;
//   4. `remove_cluster()` breaks the logs, wearing the axe;
//   5. `find_decay_leaves()` from every cluster member, then a
//      `DeferredTask::WeakenLeaves` through the `Scheduler`.
//
// Every outcome except `Felled` leaves the world untouched, and the host's
// default break applies. A size abort or a classifier veto never mutates a
// block.
//
// See also: `sim.rs` for the host-side handling of each outcome, `event.rs`
// for `Scheduler`.

use crate::actor::Actor;
use crate::classify::{classify, Decision};
use crate::cluster::find_log_cluster;
use crate::config::ChopConfig;
use crate::debug_trace;
use crate::event::{DeferredTask, Scheduler};
use crate::leaf_decay::find_decay_leaves;
use crate::prng::TickRng;
use crate::remover::{remove_cluster, RemovalReport};
use crate::types::{GameMode, VoxelCoord};
use crate::world::BlockWorld;
use serde::{Deserialize, Serialize};

/// Why a log break did not fell the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    ToolRequired,
    CreativeMode,
    TooLarge,
    PlayerMade,
    SingleBlock,
}

/// What `on_block_break()` did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChopOutcome {
    /// The broken block is not a log.
    NotALog,
    /// `require-tool` is on and the player is not holding an axe.
    ToolRequired,
    CreativeMode,
    /// The connected logs exceed `max-tree-size`.
    TooLarge { max_size: u32 },
    /// No leaves touch the logs: a player-built structure.
    PlayerMade,
    /// A lone log with no leaves around it.
    SingleBlock,
    /// The tree was felled and its leaves scheduled for weakening.
    Felled {
        report: RemovalReport,
        leaves_scheduled: usize,
    },
}

impl ChopOutcome {
    /// `true` if the core broke the blocks itself and the host must skip its
    /// default break.
    pub fn handled(&self) -> bool {
        matches!(self, ChopOutcome::Felled { .. })
    }

    /// The skip reason for a log break that did not fell anything.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            ChopOutcome::ToolRequired => Some(SkipReason::ToolRequired),
            ChopOutcome::CreativeMode => Some(SkipReason::CreativeMode),
            ChopOutcome::TooLarge { .. } => Some(SkipReason::TooLarge),
            ChopOutcome::PlayerMade => Some(SkipReason::PlayerMade),
            ChopOutcome::SingleBlock => Some(SkipReason::SingleBlock),
            ChopOutcome::NotALog | ChopOutcome::Felled { .. } => None,
        }
    }
}

pub fn on_block_break(
    world: &mut impl BlockWorld,
    actor: &mut impl Actor,
    rng: &mut TickRng,
    scheduler: &mut impl Scheduler,
    config: &ChopConfig,
    seed: VoxelCoord,
) -> ChopOutcome {
    let material = world.material_at(seed);
    if !material.is_log() {
        debug_trace!(config, "Broken block is not a log: {material:?}");
        return ChopOutcome::NotALog;
    }

    let using_axe = actor.held_item().is_some_and(|t| t.is_axe());
    if config.require_tool && !using_axe {
        debug_trace!(config, "Axe required, but player is not using one.");
        return ChopOutcome::ToolRequired;
    }

    if actor.game_mode() == GameMode::Creative {
        debug_trace!(config, "Player is in creative mode.");
        return ChopOutcome::CreativeMode;
    }

    debug_trace!(config, "Potential tree chop detected for: {material:?}");

    let cluster = match find_log_cluster(
        world,
        seed,
        material,
        config.max_tree_size,
        config.log_search_radius,
        config,
    ) {
        Ok(cluster) => cluster,
        Err(err) => {
            return ChopOutcome::TooLarge {
                max_size: err.max_size,
            };
        }
    };

    match classify(world, &cluster, config.check_for_leaves, config) {
        Decision::Proceed => {}
        Decision::AbortAsPlayerMade => return ChopOutcome::PlayerMade,
        Decision::ProceedSingleBlock => return ChopOutcome::SingleBlock,
    }

    debug_trace!(config, "Breaking {} logs.", cluster.len());
    let report = remove_cluster(world, actor, rng, &cluster, config);

    let leaves = find_decay_leaves(world, cluster.members(), config.leaf_search_radius, config);
    let leaves_scheduled = leaves.len();
    if !leaves.is_empty() {
        scheduler.run_after(
            config.leaf_decay_delay_ticks,
            DeferredTask::WeakenLeaves { leaves },
        );
    }

    log::info!(
        "Felled {:?} tree at {seed}: {} logs broken, {} leaves scheduled",
        cluster.material(),
        report.broken_count,
        leaves_scheduled
    );
    if report.tool_broke {
        log::info!("Axe broke while felling the tree at {seed}");
    }

    ChopOutcome::Felled {
        report,
        leaves_scheduled,
    }
}
