//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `events` and `run_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, RunSummaryRow};

pub const DATABASE_FILE: &str = "output.db";

/// Writes the observation log and run summaries to an SQLite database.
pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(DATABASE_FILE))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS events (
                 seq           INTEGER PRIMARY KEY,
                 time          REAL    NOT NULL,
                 kind          TEXT    NOT NULL,
                 outcome       TEXT    NOT NULL,
                 vehicle_id    INTEGER NOT NULL,
                 velocity      REAL    NOT NULL,
                 call_duration REAL    NOT NULL,
                 root_station  INTEGER NOT NULL,
                 root_position REAL    NOT NULL,
                 root_time     REAL    NOT NULL,
                 blocked       INTEGER NOT NULL,
                 dropped       INTEGER NOT NULL,
                 completed     INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS run_summaries (
                 run                  INTEGER PRIMARY KEY,
                 clock                REAL    NOT NULL,
                 admitted             INTEGER NOT NULL,
                 blocked              INTEGER NOT NULL,
                 dropped              INTEGER NOT NULL,
                 completed            INTEGER NOT NULL,
                 blocking_probability REAL    NOT NULL,
                 dropping_probability REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO events \
                 (seq, time, kind, outcome, vehicle_id, velocity, call_duration, \
                  root_station, root_position, root_time, blocked, dropped, completed) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.seq as i64,
                    row.time,
                    row.kind,
                    row.outcome,
                    row.vehicle_id as i64,
                    row.velocity,
                    row.call_duration,
                    row.root_station,
                    row.root_position,
                    row.root_time,
                    row.blocked as i64,
                    row.dropped as i64,
                    row.completed as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO run_summaries \
             (run, clock, admitted, blocked, dropped, completed, \
              blocking_probability, dropping_probability) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.run as i64,
                row.clock,
                row.admitted as i64,
                row.blocked as i64,
                row.dropped as i64,
                row.completed as i64,
                row.blocking_probability,
                row.dropping_probability,
            ],
        )?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
