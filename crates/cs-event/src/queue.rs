//! `EventQueue`: min-time priority queue with FIFO ties.
//!
//! # Performance note
//!
//! `BinaryHeap` gives O(log n) push and pop.  A long run keeps a few
//! thousand vehicles in flight, each with exactly one pending event, so the
//! heap stays small and flat.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use cs_core::SimTime;
use cs_vehicle::Vehicle;

use crate::{Event, EventError, EventKind, EventResult};

/// Heap entry.  `seq` is the insertion counter used to break time ties.
struct Entry {
    seq:   u64,
    event: Event,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: `BinaryHeap` is a max-heap.
        other.event.time.total_cmp(&self.event.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending events of one simulator, ordered by `(time, insertion order)`.
#[derive(Default)]
pub struct EventQueue {
    heap:     BinaryHeap<Entry>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` for `vehicle` at `time`.
    pub fn push(&mut self, time: SimTime, kind: EventKind, vehicle: Vehicle) {
        debug_assert!(time.0.is_finite(), "non-finite event time {time}");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { seq, event: Event { time, kind, vehicle } });
    }

    /// Remove and return the earliest event.
    pub fn pop_min(&mut self) -> EventResult<Event> {
        self.heap
            .pop()
            .map(|entry| entry.event)
            .ok_or(EventError::EmptyQueue)
    }

    /// Time of the earliest pending event, or `None` if empty.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|entry| entry.event.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// All pending events in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.heap.iter().map(|entry| &entry.event)
    }
}
