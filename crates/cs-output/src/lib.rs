//! `cs-output`: writers for the simulator's observation log.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created                          |
//! |-----------|-------------|----------------------------------------|
//! | *(none)*  | CSV         | `event_log.csv`, `run_summaries.csv`   |
//! | `sqlite`  | SQLite      | `output.db`                            |
//!
//! Both implement [`OutputWriter`] and are driven by [`LogOutputObserver`],
//! which implements `cs_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvWriter, LogOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = LogOutputObserver::new(writer);
//! sim.run(100_000, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::LogOutputObserver;
pub use row::{EventRow, RunSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
