//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, RunSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are returned here but stored by
/// [`LogOutputObserver`][crate::LogOutputObserver], since observer callbacks
/// cannot fail.
pub trait OutputWriter {
    /// Append a batch of event rows, in dispatch order.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Append one end-of-run summary row.
    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Push everything written so far to disk.  Safe to call repeatedly;
    /// writing may continue afterwards.
    fn flush(&mut self) -> OutputResult<()>;
}
