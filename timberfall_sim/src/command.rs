// Commands that mutate simulation state.
//
// All external input to `ChopSim` goes through `SimCommand`: a player id, the
// tick to apply it at, and a `SimAction`. Current actions:
// - `BreakBlock`: the player breaks the block at a position; runs the
//   felling pipeline and falls back to the default single-block break.
// - `SetHeldItem`: replace (or empty) the player's hand.
// - `SetGameMode`: switch between survival and creative.
//
// See also: `sim.rs` for `apply_command()` which dispatches these.
//
// **Critical constraint: determinism.** Commands are the sole external input
// to the sim. Internal state changes come from scheduled events (see
// `event.rs`).

use crate::types::{GameMode, PlayerId, ToolStack, VoxelCoord};
use serde::{Deserialize, Serialize};

/// A player-issued command targeting a specific simulation tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimCommand {
    pub player_id: PlayerId,
    pub tick: u64,
    pub action: SimAction,
}

/// The specific action a command performs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SimAction {
    BreakBlock { position: VoxelCoord },
    SetHeldItem { item: Option<ToolStack> },
    SetGameMode { mode: GameMode },
}
