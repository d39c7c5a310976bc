// Cluster removal: breaks a felled tree log by log, wearing the axe.
//
// `remove_cluster()` walks the non-seed members in discovery order and breaks
// each one naturally with the held item. A refused break (protection, or the
// block already gone) is skipped silently and never retried.
//
// After every successful break with an axe, the axe takes one Unbreaking roll
// through `apply_wear()`: damage with probability `1 / (level + 1)`. When the
// damage reaches the item's max durability the axe is destroyed: the hand is
// emptied, the break feedback plays, and no further non-seed member is
// processed. Logs not reached stay standing.
//
// The seed is handled last and never charged a wear roll here (the host's own
// break handling covers the seed):
// - axe intact: natural break with the (possibly damaged) held item;
// - axe destroyed: the seed is cleared to air without drops, and still counts.
//
// See also: `cluster.rs` for `LogCluster`, `actor.rs` for the held-item seam,
// `sim.rs` which reuses `apply_wear()` for the host's default break.
//
// **Critical constraint: determinism.** Wear rolls draw from the caller's
// `TickRng`, one roll per successful break, in member order.

use crate::actor::Actor;
use crate::cluster::LogCluster;
use crate::config::ChopConfig;
use crate::debug_trace;
use crate::prng::TickRng;
use crate::types::VoxelCoord;
use crate::world::BlockWorld;
use serde::{Deserialize, Serialize};

/// Result of one wear roll on the held item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wear {
    /// No durable item held, or Unbreaking absorbed the hit.
    Unchanged,
    Damaged,
    /// The item broke and was removed from the actor's hand.
    Destroyed,
}

/// Roll one point of wear on the actor's held item.
pub fn apply_wear(actor: &mut impl Actor, rng: &mut TickRng) -> Wear {
    let Some(tool) = actor.held_item_mut() else {
        return Wear::Unchanged;
    };
    if !tool.is_durable() {
        return Wear::Unchanged;
    }
    if !rng.one_in(u64::from(tool.unbreaking) + 1) {
        return Wear::Unchanged;
    }
    tool.damage += 1;
    if tool.is_worn_out() {
        actor.clear_held_item();
        actor.play_break_feedback();
        Wear::Destroyed
    } else {
        Wear::Damaged
    }
}

/// What `remove_cluster()` did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalReport {
    /// Blocks removed, seed included (natural breaks plus the forced seed clear).
    pub broken_count: usize,
    /// The axe broke partway through.
    pub tool_broke: bool,
    /// Wear rolls that actually damaged the axe.
    pub durability_charged: u32,
    /// Members whose natural break the world refused.
    pub denied: Vec<VoxelCoord>,
    /// Non-seed members left standing because the axe broke first.
    pub left_standing: usize,
}

pub fn remove_cluster(
    world: &mut impl BlockWorld,
    actor: &mut impl Actor,
    rng: &mut TickRng,
    cluster: &LogCluster,
    config: &ChopConfig,
) -> RemovalReport {
    let mut report = RemovalReport::default();
    let others = cluster.non_seed_members();

    for (i, &log) in others.iter().enumerate() {
        let tool = actor.held_item().copied();
        if !world.break_naturally(log, tool.as_ref()) {
            debug_trace!(config, "Failed to break log at: {log}");
            report.denied.push(log);
            continue;
        }
        report.broken_count += 1;

        if !tool.is_some_and(|t| t.is_axe()) {
            continue;
        }
        match apply_wear(actor, rng) {
            Wear::Unchanged => {}
            Wear::Damaged => report.durability_charged += 1,
            Wear::Destroyed => {
                report.durability_charged += 1;
                report.tool_broke = true;
                report.left_standing = others.len() - i - 1;
                debug_trace!(config, "Player's axe broke!");
                break;
            }
        }
    }

    let seed = cluster.seed();
    if report.tool_broke {
        world.set_empty(seed);
        report.broken_count += 1;
        debug_trace!(config, "Original block broken without tool due to prior tool break.");
    } else {
        let tool = actor.held_item().copied();
        if world.break_naturally(seed, tool.as_ref()) {
            report.broken_count += 1;
            debug_trace!(config, "Broke original block: {seed}");
        } else {
            report.denied.push(seed);
            debug_trace!(config, "Failed to break original block: {seed}");
        }
    }

    debug_trace!(
        config,
        "Finished breaking logs. Total broken: {}",
        report.broken_count
    );
    report
}
