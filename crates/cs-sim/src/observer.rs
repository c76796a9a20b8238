//! Simulation observer trait and the built-in observers.

use cs_core::SimTime;

use crate::{CallStats, EventRecord};

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] and
/// [`Simulator::run_until`][crate::Simulator::run_until].
///
/// Both methods default to no-ops so implementors only override what they
/// care about.
///
/// # Example: blocking-rate printer
///
/// ```rust,ignore
/// struct Progress { every: u64, seen: u64 }
///
/// impl SimObserver for Progress {
///     fn on_event(&mut self, record: &EventRecord) {
///         self.seen += 1;
///         if self.seen % self.every == 0 {
///             println!("{}: {} blocked so far", record.time, record.blocked);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once per dispatched event, in dispatch order.
    fn on_event(&mut self, _record: &EventRecord) {}

    /// Called once when a run call returns successfully.
    fn on_run_end(&mut self, _clock: SimTime, _stats: &CallStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Collects every [`EventRecord`] in dispatch order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }
}

impl SimObserver for EventLog {
    fn on_event(&mut self, record: &EventRecord) {
        self.records.push(*record);
    }
}
