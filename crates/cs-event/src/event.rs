//! Plain event types.

use std::fmt;

use cs_core::SimTime;
use cs_vehicle::Vehicle;

/// What happens to a call when its event fires.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A new call asks its root station for a channel.
    Initiation,
    /// An active call crosses into the next cell.
    Handover,
    /// The call ends, or its vehicle leaves the road.
    Termination,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Initiation  => "initiation",
            EventKind::Handover    => "handover",
            EventKind::Termination => "termination",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled event.  Owns a copy of the vehicle it concerns.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Event {
    pub time:    SimTime,
    pub kind:    EventKind,
    pub vehicle: Vehicle,
}
