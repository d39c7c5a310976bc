// Deferred tasks and narrative events.
//
// The felling core runs synchronously inside one block-break, except for leaf
// weakening, which must happen after the log removals are committed. The core
// hands that work to a `Scheduler` as a `DeferredTask`: plain data that
// captures everything the continuation needs (the `LeafSet`) by value. The
// host decides when it fires; `ChopSim` keeps them in an `EventQueue`.
//
// This file defines:
// - `Scheduler` / `DeferredTask`: the seam the orchestrator schedules through.
// - `EventQueue` / `ScheduledEvent`: the sim's min-heap of pending tasks,
//   ordered by `(tick, sequence)`.
// - `TickScheduler`: a `Scheduler` over an `EventQueue` at a given tick.
// - `SimEvent`: player-visible narrative events emitted by `ChopSim::step()`.
//
// See also: `chop.rs` which schedules `WeakenLeaves`, `sim.rs` for the tick
// loop that fires them, `leaf_decay.rs` for `LeafSet`.
//
// **Critical constraint: determinism.** Event ordering must be reproducible.
// The `(tick, sequence)` key provides a total order.

use crate::chop::SkipReason;
use crate::leaf_decay::LeafSet;
use crate::types::{ItemType, Material, PlayerId, VoxelCoord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

// ---------------------------------------------------------------------------
// Deferred work
// ---------------------------------------------------------------------------

/// Work the core asks the host to run later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredTask {
    /// Weaken the leaves left behind by a felled tree.
    WeakenLeaves { leaves: LeafSet },
}

/// One-shot delayed execution provided by the host.
pub trait Scheduler {
    /// Run `task` once, `delay_ticks` after the current tick.
    fn run_after(&mut self, delay_ticks: u64, task: DeferredTask);
}

// ---------------------------------------------------------------------------
// Internal scheduled events (priority queue)
// ---------------------------------------------------------------------------

/// A deferred task waiting in the queue.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// The tick at which this event should fire.
    pub tick: u64,
    /// Tiebreak within a tick. Lower values are processed first.
    pub sequence: u64,
    pub kind: DeferredTask,
}

// Min-heap: lowest (tick, sequence) fires first. BinaryHeap is a max-heap,
// so the ordering is reversed.
impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.tick == other.tick && self.sequence == other.sequence
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .tick
            .cmp(&self.tick)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority queue of deferred tasks, earliest tick first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventQueue {
    heap: BinaryHeap<ScheduledEvent>,
    /// Monotonic counter for deterministic ordering within a tick.
    next_sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task at the given tick.
    pub fn schedule(&mut self, tick: u64, kind: DeferredTask) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(ScheduledEvent {
            tick,
            sequence,
            kind,
        });
    }

    /// Tick of the next pending event.
    pub fn peek_tick(&self) -> Option<u64> {
        self.heap.peek().map(|e| e.tick)
    }

    /// Pop the next event if its tick is <= `up_to_tick`.
    pub fn pop_if_ready(&mut self, up_to_tick: u64) -> Option<ScheduledEvent> {
        if self.heap.peek().is_some_and(|e| e.tick <= up_to_tick) {
            self.heap.pop()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Schedules into an `EventQueue` relative to `now`.
pub struct TickScheduler<'a> {
    queue: &'a mut EventQueue,
    now: u64,
}

impl<'a> TickScheduler<'a> {
    pub fn new(queue: &'a mut EventQueue, now: u64) -> Self {
        Self { queue, now }
    }
}

impl Scheduler for TickScheduler<'_> {
    fn run_after(&mut self, delay_ticks: u64, task: DeferredTask) {
        self.queue.schedule(self.now.saturating_add(delay_ticks), task);
    }
}

// ---------------------------------------------------------------------------
// Player-visible narrative events (output)
// ---------------------------------------------------------------------------

/// A narrative event emitted by the simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimEvent {
    pub tick: u64,
    pub kind: SimEventKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEventKind {
    /// The host's own single-block break happened.
    BlockBroken {
        player_id: PlayerId,
        position: VoxelCoord,
        material: Material,
    },
    /// A whole tree came down.
    TreeFelled {
        player_id: PlayerId,
        position: VoxelCoord,
        material: Material,
        broken_count: usize,
        left_standing: usize,
        leaves_scheduled: usize,
    },
    /// A log was broken but the tree was not felled.
    ChopSkipped {
        player_id: PlayerId,
        position: VoxelCoord,
        reason: SkipReason,
    },
    /// The player's held item wore out.
    ToolBroke { player_id: PlayerId, item: ItemType },
    /// A deferred leaf weakening ran.
    LeavesWeakened { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(coords: &[VoxelCoord]) -> DeferredTask {
        DeferredTask::WeakenLeaves {
            leaves: LeafSet::from_coords(coords.to_vec()),
        }
    }

    #[test]
    fn event_queue_ordering() {
        let a = VoxelCoord::new(1, 1, 1);
        let b = VoxelCoord::new(2, 2, 2);

        let mut queue = EventQueue::new();
        // Schedule out of order.
        queue.schedule(100, leaves(&[b]));
        queue.schedule(50, leaves(&[a]));
        queue.schedule(50, leaves(&[b]));

        // Tick order, then sequence order within a tick.
        let first = queue.pop_if_ready(200).unwrap();
        assert_eq!(first.tick, 50);
        assert_eq!(first.sequence, 1);
        assert_eq!(first.kind, leaves(&[a]));

        let second = queue.pop_if_ready(200).unwrap();
        assert_eq!(second.tick, 50);
        assert_eq!(second.sequence, 2);

        let third = queue.pop_if_ready(200).unwrap();
        assert_eq!(third.tick, 100);

        assert!(queue.pop_if_ready(200).is_none());
    }

    #[test]
    fn pop_if_ready_respects_tick_limit() {
        let mut queue = EventQueue::new();
        queue.schedule(100, leaves(&[]));

        assert!(queue.pop_if_ready(99).is_none());
        assert!(queue.pop_if_ready(100).is_some());
    }

    #[test]
    fn tick_scheduler_offsets_from_now() {
        let mut queue = EventQueue::new();
        {
            let mut scheduler = TickScheduler::new(&mut queue, 40);
            scheduler.run_after(1, leaves(&[]));
            scheduler.run_after(5, leaves(&[]));
        }
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek_tick(), Some(41));
        assert!(queue.pop_if_ready(40).is_none());
        assert_eq!(queue.pop_if_ready(41).map(|e| e.tick), Some(41));
        assert_eq!(queue.peek_tick(), Some(45));
    }

    #[test]
    fn tick_scheduler_saturates_at_the_last_tick() {
        let mut queue = EventQueue::new();
        TickScheduler::new(&mut queue, u64::MAX - 1).run_after(u64::MAX, leaves(&[]));
        assert_eq!(queue.peek_tick(), Some(u64::MAX));
    }

    #[test]
    fn event_queue_serialization() {
        let mut queue = EventQueue::new();
        queue.schedule(10, leaves(&[VoxelCoord::new(3, 4, 5)]));
        queue.schedule(20, leaves(&[]));

        let json = serde_json::to_string(&queue).unwrap();
        let mut restored: EventQueue = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 2);
        let first = restored.pop_if_ready(100).unwrap();
        assert_eq!(first.tick, 10);
        assert_eq!(first.kind, leaves(&[VoxelCoord::new(3, 4, 5)]));
    }
}
