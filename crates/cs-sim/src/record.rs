//! What one dispatched event did, and the running call counters.

use std::fmt;

use cs_core::SimTime;
use cs_event::EventKind;
use cs_vehicle::Vehicle;

/// Result of dispatching one event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    InitiationSuccess,
    InitiationBlocked,
    HandoverSuccess,
    HandoverDropped,
    Termination,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::InitiationSuccess => "initiation-success",
            Outcome::InitiationBlocked => "initiation-blocked",
            Outcome::HandoverSuccess   => "handover-success",
            Outcome::HandoverDropped   => "handover-dropped",
            Outcome::Termination       => "termination",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the observation log.
///
/// `vehicle` is the value the event carried when it was popped, i.e. the
/// root state *before* any re-anchoring the dispatch performed.  It is a
/// plain copy, so nothing the simulator does later can change it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    pub time:      SimTime,
    pub kind:      EventKind,
    pub outcome:   Outcome,
    pub vehicle:   Vehicle,
    pub blocked:   u64,
    pub dropped:   u64,
    pub completed: u64,
}

// ── CallStats ─────────────────────────────────────────────────────────────────

/// Counters for every terminal (and admitting) call outcome so far.
///
/// All four only ever grow.  `admitted` counts initiations that took a
/// channel; vehicles that start off the road are neither admitted nor
/// blocked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallStats {
    pub admitted:  u64,
    pub blocked:   u64,
    pub dropped:   u64,
    pub completed: u64,
}

impl CallStats {
    /// Initiations that asked a station for a channel.
    pub fn attempts(&self) -> u64 {
        self.admitted + self.blocked
    }

    /// Fraction of attempts refused at initiation; `0.0` before any attempt.
    pub fn blocking_probability(&self) -> f64 {
        ratio(self.blocked, self.attempts())
    }

    /// Fraction of admitted calls lost at a handover; `0.0` before any
    /// admission.
    pub fn dropping_probability(&self) -> f64 {
        ratio(self.dropped, self.admitted)
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
