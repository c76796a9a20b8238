//! Simulation time model.
//!
//! # Design
//!
//! Time is logical and continuous: a `SimTime` is a count of simulated
//! seconds since the start of the run, advanced only by popping events.
//! There is no wall clock anywhere in the simulator.
//!
//! `f64` is not `Ord`, but the event queue needs a total order.  `SimTime`
//! provides one through [`f64::total_cmp`]; schedulers only ever produce
//! finite times, so the NaN ordering never comes into play.

use std::cmp::Ordering;
use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point in simulated time, in seconds.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Seconds since the start of the run.
    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// The instant `dt` seconds after `self`.
    #[inline]
    pub fn offset(self, dt: f64) -> SimTime {
        SimTime(self.0 + dt)
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// The earlier of two instants.
    #[inline]
    pub fn min(self, other: SimTime) -> SimTime {
        if self.total_cmp(&other).is_le() { self } else { other }
    }

    /// Total order over all `f64` bit patterns.
    #[inline]
    pub fn total_cmp(&self, other: &SimTime) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl From<f64> for SimTime {
    #[inline]
    fn from(secs: f64) -> SimTime {
        SimTime(secs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s", self.0)
    }
}
