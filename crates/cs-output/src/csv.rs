//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `event_log.csv`
//! - `run_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, RunSummaryRow};

pub const EVENT_LOG_FILE: &str = "event_log.csv";
pub const RUN_SUMMARY_FILE: &str = "run_summaries.csv";

/// Writes the observation log and run summaries to two CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
}

impl CsvWriter {
    /// Create (truncating) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join(EVENT_LOG_FILE))?;
        events.write_record([
            "seq",
            "time",
            "kind",
            "outcome",
            "vehicle_id",
            "velocity",
            "call_duration",
            "root_station",
            "root_position",
            "root_time",
            "blocked",
            "dropped",
            "completed",
        ])?;

        let mut summaries = Writer::from_path(dir.join(RUN_SUMMARY_FILE))?;
        summaries.write_record([
            "run",
            "clock",
            "admitted",
            "blocked",
            "dropped",
            "completed",
            "blocking_probability",
            "dropping_probability",
        ])?;

        Ok(Self { events, summaries })
    }
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.seq.to_string(),
                row.time.to_string(),
                row.kind.to_owned(),
                row.outcome.to_owned(),
                row.vehicle_id.to_string(),
                row.velocity.to_string(),
                row.call_duration.to_string(),
                row.root_station.to_string(),
                row.root_position.to_string(),
                row.root_time.to_string(),
                row.blocked.to_string(),
                row.dropped.to_string(),
                row.completed.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.run.to_string(),
            row.clock.to_string(),
            row.admitted.to_string(),
            row.blocked.to_string(),
            row.dropped.to_string(),
            row.completed.to_string(),
            row.blocking_probability.to_string(),
            row.dropping_probability.to_string(),
        ])?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
