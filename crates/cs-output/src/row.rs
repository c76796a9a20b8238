//! Plain data row types written by output backends.

use cs_core::SimTime;
use cs_sim::{CallStats, EventRecord};

/// One dispatched event, flattened for tabular output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    /// Position in the dispatch sequence, from 0.
    pub seq:           u64,
    pub time:          f64,
    pub kind:          &'static str,
    pub outcome:       &'static str,
    pub vehicle_id:    u64,
    /// Signed speed in m/s; the sign is the direction of travel.
    pub velocity:      f64,
    pub call_duration: f64,
    /// Root state the event carried (before any re-anchoring).
    pub root_station:  u32,
    pub root_position: f64,
    pub root_time:     f64,
    pub blocked:       u64,
    pub dropped:       u64,
    pub completed:     u64,
}

impl EventRow {
    pub fn from_record(seq: u64, record: &EventRecord) -> Self {
        let v = &record.vehicle;
        Self {
            seq,
            time:          record.time.secs(),
            kind:          record.kind.as_str(),
            outcome:       record.outcome.as_str(),
            vehicle_id:    v.id().0,
            velocity:      v.velocity(),
            call_duration: v.call_duration(),
            root_station:  v.root_station().0,
            root_position: v.root_position(),
            root_time:     v.root_time().secs(),
            blocked:       record.blocked,
            dropped:       record.dropped,
            completed:     record.completed,
        }
    }
}

/// Counters at the end of one `run` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummaryRow {
    /// Number of the run call on this observer, from 0.
    pub run:                  u64,
    pub clock:                f64,
    pub admitted:             u64,
    pub blocked:              u64,
    pub dropped:              u64,
    pub completed:            u64,
    pub blocking_probability: f64,
    pub dropping_probability: f64,
}

impl RunSummaryRow {
    pub fn new(run: u64, clock: SimTime, stats: &CallStats) -> Self {
        Self {
            run,
            clock:                clock.secs(),
            admitted:             stats.admitted,
            blocked:              stats.blocked,
            dropped:              stats.dropped,
            completed:            stats.completed,
            blocking_probability: stats.blocking_probability(),
            dropping_probability: stats.dropping_probability(),
        }
    }
}
