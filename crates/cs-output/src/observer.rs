//! `LogOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use cs_core::SimTime;
use cs_sim::{CallStats, EventRecord, SimObserver};
use tracing::warn;

use crate::row::{EventRow, RunSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// Rows buffered before they are handed to the writer.
pub const DEFAULT_BATCH_SIZE: usize = 4_096;

/// A [`SimObserver`] that writes every dispatched event, and a summary at
/// the end of each run, to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct LogOutputObserver<W: OutputWriter> {
    writer:     W,
    buffer:     Vec<EventRow>,
    batch_size: usize,
    next_seq:   u64,
    runs:       u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> LogOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self::with_batch_size(writer, DEFAULT_BATCH_SIZE)
    }

    /// Hand rows to the writer every `batch_size` events (at least 1).
    pub fn with_batch_size(writer: W, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            writer,
            buffer: Vec::with_capacity(batch_size),
            batch_size,
            next_seq: 0,
            runs: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Events seen so far.
    pub fn events_seen(&self) -> u64 {
        self.next_seq
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn drain_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let result = self.writer.write_events(&self.buffer);
        self.buffer.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for LogOutputObserver<W> {
    fn on_event(&mut self, record: &EventRecord) {
        self.buffer.push(EventRow::from_record(self.next_seq, record));
        self.next_seq += 1;
        if self.buffer.len() >= self.batch_size {
            self.drain_buffer();
        }
    }

    fn on_run_end(&mut self, clock: SimTime, stats: &CallStats) {
        self.drain_buffer();
        let row = RunSummaryRow::new(self.runs, clock, stats);
        self.runs += 1;
        let result = self.writer.write_run_summary(&row);
        self.store_err(result);
        let result = self.writer.flush();
        self.store_err(result);
    }
}
