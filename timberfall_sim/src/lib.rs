// timberfall_sim: tree felling for voxel worlds.
//
// When a player breaks a log, this crate finds the connected tree, decides
// whether it grew naturally or was stacked by a player, breaks the whole
// trunk while wearing the player's axe, and schedules the leftover canopy to
// decay a tick later.
//
// Module overview:
// - `chop.rs`:       `on_block_break()` orchestrator and `ChopOutcome`.
// - `cluster.rs`:    Bounded 26-neighbor BFS collecting a `LogCluster`.
// - `classify.rs`:   Natural tree vs. player-built pile (`Decision`).
// - `remover.rs`:    Ordered log removal with Unbreaking wear rolls.
// - `leaf_decay.rs`: Radius-bounded leaf BFS and the deferred weakening.
// - `world.rs`:      `BlockWorld` seam + `VoxelWorld` dense grid.
// - `actor.rs`:      `Actor` seam + `Player`.
// - `event.rs`:      `Scheduler` / `DeferredTask`, `EventQueue`, narrative `SimEvent`s.
// - `sim.rs`:        `ChopSim` tick loop hosting the core.
// - `command.rs`:    `SimCommand` / `SimAction`: all sim mutations.
// - `tree_gen.rs`:   `TreeProfile` presets and `plant_tree()`.
// - `config.rs`:     `ChopConfig`: every tunable, loaded from JSON.
// - `error.rs`:      `ConfigError`, `ClusterTooLarge`.
// - `logging.rs`:    `debug_trace!` and `env_logger` setup.
// - `prng`:          Re-exported from `timberfall_prng`: xoshiro256++ PRNG.
// - `types.rs`:      VoxelCoord, materials, leaf state, items, player ids.
//
// **Critical constraint: determinism.** Given the same world, config, seed
// and commands, the sim produces the same blocks, drops and events. No
// `HashMap`, no system time, no OS entropy.

pub mod actor;
pub mod chop;
pub mod classify;
pub mod cluster;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod leaf_decay;
pub mod logging;
pub use timberfall_prng as prng;
pub mod remover;
pub mod sim;
pub mod tree_gen;
pub mod types;
pub mod world;
