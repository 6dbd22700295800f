use keyed_priority_queue::KeyedPriorityQueue;
use slotmap::{SlotMap, new_key_type};

use super::state::{ProcessId, SimCtx, Ticks};

new_key_type! {
    struct EventKey;
}

/// The closed set of things that can happen at a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The process becomes eligible for scheduling.
    Arrival { process: ProcessId },
    /// The process finishes an I/O operation and becomes eligible again.
    /// The driver never produces these itself; they enter via
    /// [`Simulation::schedule`](crate::sim::Simulation::schedule) and apply
    /// identically to `Arrival`.
    IoCompletion { process: ProcessId },
}

/// A timestamped action against shared simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: Ticks,
    pub action: Action,
}

impl Event {
    pub fn arrival(timestamp: Ticks, process: ProcessId) -> Self {
        Self {
            timestamp,
            action: Action::Arrival { process },
        }
    }

    pub fn io_completion(timestamp: Ticks, process: ProcessId) -> Self {
        Self {
            timestamp,
            action: Action::IoCompletion { process },
        }
    }

    pub fn process(&self) -> ProcessId {
        match self.action {
            Action::Arrival { process } | Action::IoCompletion { process } => process,
        }
    }

    /// Mutate shared state. Both variants feed the ready queue.
    pub fn apply(&self, ctx: &mut SimCtx) {
        match self.action {
            Action::Arrival { process } | Action::IoCompletion { process } => {
                ctx.ready.add(process);
            }
        }
    }
}

// KeyedPriorityQueue is a max-heap, so Stamp's Ord is flipped: the smallest
// (time, seq) pair wins. seq fixes the tie-break at insertion order.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
struct Stamp {
    time: Ticks,
    seq: u64,
}

impl PartialOrd for Stamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Stamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.time, other.seq).cmp(&(self.time, self.seq))
    }
}

/// Pending events, earliest timestamp first. Equal timestamps pop in
/// insertion order (stable FIFO), which makes dispatch order deterministic.
#[derive(Debug)]
pub struct EventQueue {
    events: SlotMap<EventKey, Event>,
    order: KeyedPriorityQueue<EventKey, Stamp>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: SlotMap::with_key(),
            order: KeyedPriorityQueue::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let key = self.events.insert(event);
        self.order.push(
            key,
            Stamp {
                time: event.timestamp,
                seq,
            },
        );
    }

    /// Remove and return the earliest event, or None when drained.
    pub fn pop(&mut self) -> Option<Event> {
        let (key, _) = self.order.pop()?;
        let event = self.events.remove(key);
        debug_assert!(event.is_some(), "heap key missing from event table");
        event
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
