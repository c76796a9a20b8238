//! Integration tests for cs-output.

use cs_core::SimConfig;
use cs_sim::{SimBuilder, Simulator};
use cs_variate::ConstantSource;

/// Three eastbound calls at station 5 that end before reaching station 6:
/// three initiations then three terminations.
fn short_calls_sim() -> Simulator<ConstantSource> {
    let config = SimConfig { enable_new_initiation: false, ..SimConfig::default() };
    let mut sim = SimBuilder::new(config, ConstantSource::default())
        .without_initial_arrival()
        .build()
        .unwrap();
    for i in 0..3 {
        sim.schedule_initiation(cs_core::SimTime(i as f64), 1.0, 50.0, 0.0, 5).unwrap();
    }
    sim
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use cs_sim::SimObserver;

    use super::short_calls_sim;
    use crate::csv::{CsvWriter, EVENT_LOG_FILE, RUN_SUMMARY_FILE};
    use crate::observer::LogOutputObserver;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_rows(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.flush().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(EVENT_LOG_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers[..4], ["seq", "time", "kind", "outcome"]);
        assert_eq!(headers.len(), 13);

        let mut rdr = csv::Reader::from_path(dir.path().join(RUN_SUMMARY_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers[0], "run");
        assert_eq!(headers[7], "dropping_probability");
    }

    #[test]
    fn empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[]).unwrap();
        w.flush().unwrap();
        w.flush().unwrap();
    }

    #[test]
    fn observer_writes_every_event_in_order() {
        let dir = tmp();
        let mut sim = short_calls_sim();
        let mut obs = LogOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(100, &mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(obs.events_seen(), 6);

        let rows = read_rows(dir.path().join(EVENT_LOG_FILE));
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][2], "initiation");
        assert_eq!(&rows[0][3], "initiation-success");
        assert_eq!(&rows[3][1], "50");
        assert_eq!(&rows[3][2], "termination");
        assert_eq!(&rows[5][12], "3"); // completed
    }

    #[test]
    fn one_summary_row_per_run() {
        let dir = tmp();
        let mut sim = short_calls_sim();
        let mut obs = LogOutputObserver::with_batch_size(CsvWriter::new(dir.path()).unwrap(), 2);
        sim.run(3, &mut obs).unwrap();
        sim.run(100, &mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let summaries = read_rows(dir.path().join(RUN_SUMMARY_FILE));
        assert_eq!(summaries.len(), 2);
        assert_eq!(&summaries[0][0], "0");
        assert_eq!(&summaries[0][2], "3"); // admitted
        assert_eq!(&summaries[0][5], "0"); // completed
        assert_eq!(&summaries[1][1], "52"); // clock
        assert_eq!(&summaries[1][5], "3");

        assert_eq!(read_rows(dir.path().join(EVENT_LOG_FILE)).len(), 6);
    }

    #[test]
    fn partial_batch_is_written_at_run_end() {
        let dir = tmp();
        let mut obs = LogOutputObserver::with_batch_size(CsvWriter::new(dir.path()).unwrap(), 1_000);
        let mut sim = short_calls_sim();
        sim.run(1, &mut obs).unwrap();
        assert_eq!(read_rows(dir.path().join(EVENT_LOG_FILE)).len(), 1);

        // Events seen outside a run stay buffered until the next run end.
        let record = sim.step().unwrap();
        obs.on_event(&record);
        assert_eq!(read_rows(dir.path().join(EVENT_LOG_FILE)).len(), 1);
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use cs_core::SimTime;
    use cs_sim::{CallStats, EventLog};

    use super::short_calls_sim;
    use crate::{EventRow, RunSummaryRow};

    #[test]
    fn event_row_flattens_record() {
        let mut sim = short_calls_sim();
        let mut log = EventLog::new();
        sim.run(4, &mut log).unwrap();

        let row = EventRow::from_record(3, &log.records()[3]);
        assert_eq!(row.seq, 3);
        assert_eq!(row.time, 50.0);
        assert_eq!(row.kind, "termination");
        assert_eq!(row.outcome, "termination");
        assert_eq!(row.vehicle_id, 0);
        assert_eq!(row.velocity, 1.0);
        assert_eq!(row.root_station, 5);
        assert_eq!((row.blocked, row.dropped, row.completed), (0, 0, 1));
    }

    #[test]
    fn summary_row_carries_probabilities() {
        let stats = CallStats { admitted: 8, blocked: 2, dropped: 2, completed: 6 };
        let row = RunSummaryRow::new(1, SimTime(99.5), &stats);
        assert_eq!(row.clock, 99.5);
        assert_eq!(row.blocking_probability, 0.2);
        assert_eq!(row.dropping_probability, 0.25);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::short_calls_sim;
    use crate::observer::LogOutputObserver;
    use crate::sqlite::{DATABASE_FILE, SqliteWriter};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(DATABASE_FILE).exists());
    }

    #[test]
    fn sqlite_event_and_summary_counts() {
        let dir = tmp();
        let mut sim = short_calls_sim();
        let mut obs = LogOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        sim.run(100, &mut obs).unwrap();
        assert!(obs.take_error().is_none());
        drop(obs);

        let conn = rusqlite::Connection::open(dir.path().join(DATABASE_FILE)).unwrap();
        let events: i64 = conn
            .query_row("SELECT COUNT(*) FROM events", [], |r| r.get(0))
            .unwrap();
        assert_eq!(events, 6);

        let terminations: i64 = conn
            .query_row("SELECT COUNT(*) FROM events WHERE kind = 'termination'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(terminations, 3);

        let (clock, completed): (f64, i64) = conn
            .query_row("SELECT clock, completed FROM run_summaries WHERE run = 0", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(clock, 52.0);
        assert_eq!(completed, 3);
    }
}
