// Host simulation: tick loop around the felling core.
//
// `ChopSim` plays the part of the game server: it owns the voxel world, the
// players, the PRNG, the config and the queue of deferred tasks. The sim is
// driven by `step(commands, target_tick)`, which interleaves commands and
// scheduled events in tick order and returns the narrative events emitted
// along the way. Empty ticks are free.
//
// ## Block breaks
//
// A `BreakBlock` command first goes through `chop::on_block_break()`. If the
// outcome is handled (the tree was felled) the core has already broken the
// blocks, and the sim only charges its native wear roll for the broken log
// itself, unless the axe already broke mid-fell. Otherwise the sim performs
// its own default break of the single block: a natural break with the held
// item followed by the same native wear roll. Creative players take no wear.
//
// ## Deferred tasks
//
// `DeferredTask::WeakenLeaves` fires `leaf-decay-delay-ticks` after the fell
// and runs `leaf_decay::weaken_leaves()` against the world as it is then.
//
// See also: `chop.rs` for the orchestrator, `event.rs` for the queue and
// narrative events, `command.rs` for `SimCommand`.
//
// **Critical constraint: determinism.** All state mutations flow through
// `SimCommand` or scheduled events. All randomness comes from `rng`.

use crate::actor::Player;
use crate::chop::{self, ChopOutcome};
use crate::command::{SimAction, SimCommand};
use crate::config::ChopConfig;
use crate::event::{DeferredTask, EventQueue, SimEvent, SimEventKind, TickScheduler};
use crate::leaf_decay;
use crate::prng::TickRng;
use crate::remover::{self, Wear};
use crate::types::{GameMode, Material, PlayerId, VoxelCoord};
use crate::world::{BlockWorld, VoxelWorld};
use std::collections::BTreeMap;

/// Top-level simulation state.
#[derive(Clone, Debug)]
pub struct ChopSim {
    /// Current simulation tick.
    pub tick: u64,

    /// The simulation's deterministic PRNG.
    pub rng: TickRng,

    /// Felling configuration (immutable after initialization).
    pub config: ChopConfig,

    pub world: VoxelWorld,

    /// BTreeMap for deterministic iteration.
    pub players: BTreeMap<PlayerId, Player>,

    /// Deferred tasks waiting to fire.
    pub event_queue: EventQueue,

    next_player_id: u32,
}

/// The result of processing commands and advancing the simulation.
pub struct StepResult {
    /// Narrative events emitted during this step.
    pub events: Vec<SimEvent>,
}

impl ChopSim {
    pub fn new(seed: u64, config: ChopConfig, world: VoxelWorld) -> Self {
        Self {
            tick: 0,
            rng: TickRng::new(seed),
            config,
            world,
            players: BTreeMap::new(),
            event_queue: EventQueue::new(),
            next_player_id: 0,
        }
    }

    /// Register a player and return its id.
    pub fn add_player(&mut self, player: Player) -> PlayerId {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        log::debug!("{id} joined as {}", player.name);
        self.players.insert(id, player);
        id
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Apply a batch of commands and advance the sim to the target tick,
    /// processing all scheduled events up to that point.
    ///
    /// Commands must be sorted by tick. A step only applies commands while it
    /// advances, so a step with `target_tick <= self.tick` applies nothing.
    /// Commands left unapplied (tick > `target_tick`, or a step that does not
    /// advance) are dropped with a warning.
    pub fn step(&mut self, commands: &[SimCommand], target_tick: u64) -> StepResult {
        let mut events = Vec::new();
        let mut cmd_idx = 0;

        while self.tick < target_tick {
            let next_event_tick = self.event_queue.peek_tick();
            let next_cmd_tick = commands
                .get(cmd_idx)
                .filter(|c| c.tick <= target_tick)
                .map(|c| c.tick);

            let next_tick = match (next_event_tick, next_cmd_tick) {
                (Some(et), Some(ct)) => et.min(ct).min(target_tick),
                (Some(et), None) => et.min(target_tick),
                (None, Some(ct)) => ct.min(target_tick),
                (None, None) => target_tick,
            };

            self.tick = next_tick.max(self.tick);

            while cmd_idx < commands.len() && commands[cmd_idx].tick <= self.tick {
                let cmd = &commands[cmd_idx];
                cmd_idx += 1;
                self.apply_command(cmd, &mut events);
            }

            while let Some(event) = self.event_queue.pop_if_ready(self.tick) {
                self.process_event(event.kind, &mut events);
            }
        }

        for cmd in &commands[cmd_idx..] {
            log::warn!(
                "Dropping command for tick {} from {}: sim stopped at tick {}",
                cmd.tick,
                cmd.player_id,
                self.tick.max(target_tick)
            );
        }

        self.tick = self.tick.max(target_tick);
        StepResult { events }
    }

    fn apply_command(&mut self, cmd: &SimCommand, events: &mut Vec<SimEvent>) {
        if !self.players.contains_key(&cmd.player_id) {
            log::warn!("Ignoring command from unknown {}", cmd.player_id);
            return;
        }
        match &cmd.action {
            SimAction::BreakBlock { position } => {
                self.break_block(cmd.player_id, *position, events);
            }
            SimAction::SetHeldItem { item } => {
                if let Some(player) = self.players.get_mut(&cmd.player_id) {
                    player.held = *item;
                }
            }
            SimAction::SetGameMode { mode } => {
                if let Some(player) = self.players.get_mut(&cmd.player_id) {
                    player.game_mode = *mode;
                }
            }
        }
    }

    fn break_block(&mut self, player_id: PlayerId, position: VoxelCoord, events: &mut Vec<SimEvent>) {
        let Some(player) = self.players.get_mut(&player_id) else {
            return;
        };
        let material = self.world.material_at(position);
        let held_item = player.held.map(|t| t.item);

        let mut scheduler = TickScheduler::new(&mut self.event_queue, self.tick);
        let outcome = chop::on_block_break(
            &mut self.world,
            player,
            &mut self.rng,
            &mut scheduler,
            &self.config,
            position,
        );

        if let ChopOutcome::Felled {
            report,
            leaves_scheduled,
        } = &outcome
        {
            events.push(SimEvent {
                tick: self.tick,
                kind: SimEventKind::TreeFelled {
                    player_id,
                    position,
                    material,
                    broken_count: report.broken_count,
                    left_standing: report.left_standing,
                    leaves_scheduled: *leaves_scheduled,
                },
            });
            if report.tool_broke {
                if let Some(item) = held_item {
                    events.push(SimEvent {
                        tick: self.tick,
                        kind: SimEventKind::ToolBroke { player_id, item },
                    });
                }
            } else {
                self.native_wear(player_id, events);
            }
            return;
        }

        if let Some(reason) = outcome.skip_reason() {
            events.push(SimEvent {
                tick: self.tick,
                kind: SimEventKind::ChopSkipped {
                    player_id,
                    position,
                    reason,
                },
            });
        }
        self.default_break(player_id, position, events);
    }

    /// The host's own single-block break.
    fn default_break(&mut self, player_id: PlayerId, position: VoxelCoord, events: &mut Vec<SimEvent>) {
        let Some(player) = self.players.get_mut(&player_id) else {
            return;
        };
        let material = self.world.material_at(position);
        if material == Material::Air {
            return;
        }
        if !self.world.break_naturally(position, player.held.as_ref()) {
            log::debug!("Break of {material:?} at {position} was refused");
            return;
        }
        events.push(SimEvent {
            tick: self.tick,
            kind: SimEventKind::BlockBroken {
                player_id,
                position,
                material,
            },
        });

        self.native_wear(player_id, events);
    }

    /// The host's own durability roll for the block the player broke.
    fn native_wear(&mut self, player_id: PlayerId, events: &mut Vec<SimEvent>) {
        let Some(player) = self.players.get_mut(&player_id) else {
            return;
        };
        if player.game_mode == GameMode::Creative {
            return;
        }
        let held_item = player.held.map(|t| t.item);
        if remover::apply_wear(player, &mut self.rng) == Wear::Destroyed
            && let Some(item) = held_item
        {
            log::info!("{player_id}'s {item:?} broke");
            events.push(SimEvent {
                tick: self.tick,
                kind: SimEventKind::ToolBroke { player_id, item },
            });
        }
    }

    fn process_event(&mut self, kind: DeferredTask, events: &mut Vec<SimEvent>) {
        match kind {
            DeferredTask::WeakenLeaves { leaves } => {
                let count = leaf_decay::weaken_leaves(
                    &mut self.world,
                    &leaves,
                    self.config.leaf_decay_distance,
                    &self.config,
                );
                events.push(SimEvent {
                    tick: self.tick,
                    kind: SimEventKind::LeavesWeakened { count },
                });
            }
        }
    }
}
