//! Per-call vehicle root state.

use cs_core::{Highway, SimTime, StationId, VehicleId};

use crate::{KinematicsError, KinematicsResult};

/// Distance from a cell boundary, as a fraction of the cell diameter, below
/// which a vehicle is treated as sitting exactly on that boundary.
pub const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// The immutable record of one call's vehicle.
///
/// Positions are metres, velocity metres per second (the sign is the
/// direction of travel: positive towards higher station indices), times
/// seconds.
///
/// `Vehicle` is `Copy`: the simulator's observation log stores plain copies,
/// and nothing the simulator does later can change a copy already handed out.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    id:            VehicleId,
    velocity:      f64,
    /// Total call length, fixed at creation.
    call_duration: f64,
    /// Instant the call was placed.  Handover never moves it.
    call_start:    SimTime,
    /// Offset within `root_station`'s cell at `root_time`.
    root_position: f64,
    root_station:  StationId,
    /// Creation time, or the instant of the most recent handover.
    root_time:     SimTime,
}

impl Vehicle {
    pub fn new(
        id:            VehicleId,
        velocity:      f64,
        call_duration: f64,
        root_position: f64,
        root_station:  StationId,
        root_time:     SimTime,
    ) -> Self {
        Self {
            id,
            velocity,
            call_duration,
            call_start: root_time,
            root_position,
            root_station,
            root_time,
        }
    }

    // ── Root state ────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn call_duration(&self) -> f64 {
        self.call_duration
    }

    #[inline]
    pub fn call_start(&self) -> SimTime {
        self.call_start
    }

    #[inline]
    pub fn root_position(&self) -> f64 {
        self.root_position
    }

    #[inline]
    pub fn root_station(&self) -> StationId {
        self.root_station
    }

    #[inline]
    pub fn root_time(&self) -> SimTime {
        self.root_time
    }

    // ── Kinematic queries ─────────────────────────────────────────────────

    /// Sign of the velocity: `1`, `-1`, or `0` for a stationary vehicle.
    #[inline]
    pub fn direction(&self) -> i64 {
        if self.velocity > 0.0 {
            1
        } else if self.velocity < 0.0 {
            -1
        } else {
            0
        }
    }

    /// Absolute position along the road at `t`.
    #[inline]
    pub fn absolute_position(&self, hw: &Highway, t: SimTime) -> f64 {
        hw.cell_start(self.root_station)
            + self.root_position
            + self.velocity * t.since(self.root_time)
    }

    /// Station whose cell contains the vehicle at `t`, clamped to the first
    /// or last station once the vehicle has left the road.
    #[inline]
    pub fn current_station(&self, hw: &Highway, t: SimTime) -> StationId {
        hw.station_at(self.absolute_position(hw, t))
    }

    /// Index of the station the vehicle is heading into.  May be `-1` or
    /// `station_count` at the road edges; a stationary vehicle's next
    /// station is its current one.
    pub fn next_station(&self, hw: &Highway, t: SimTime) -> i64 {
        self.current_station(hw, t).0 as i64 + self.direction()
    }

    /// `true` if [`next_station`][Self::next_station] names a real station.
    pub fn next_station_is_valid(&self, hw: &Highway, t: SimTime) -> bool {
        hw.station(self.next_station(hw, t)).is_some()
    }

    /// Seconds from `t` until the vehicle crosses into the next cell in its
    /// direction of travel.
    ///
    /// Distances are measured in the root cell's frame: until the vehicle has
    /// crossed the far edge of `root_station`'s cell it counts as being in
    /// that cell, even when `root_position` lies outside `[0, cell_diameter)`.
    /// Past the far edge the usual cell grid applies.
    ///
    /// A vehicle sitting on a boundary (within [`BOUNDARY_TOLERANCE`]) has
    /// just crossed it, so the answer is a full cell transit rather than
    /// zero.  Fails for a stationary vehicle, which never crosses anything.
    pub fn time_to_next_station(&self, hw: &Highway, t: SimTime) -> KinematicsResult<f64> {
        let direction = self.direction();
        if direction == 0 {
            return Err(KinematicsError::InvalidDirection(self.id));
        }
        let d = hw.cell_diameter;
        let offset = self.root_position + self.velocity * t.since(self.root_time);

        let mut distance = if direction > 0 {
            let boundary = ((offset / d).floor() + 1.0).max(1.0) * d;
            boundary - offset
        } else {
            let boundary = ((offset / d).ceil() - 1.0).min(0.0) * d;
            offset - boundary
        };
        if distance <= d * BOUNDARY_TOLERANCE {
            distance += d;
        }
        Ok(distance / self.velocity.abs())
    }

    /// Instant at which the call ends if it is neither dropped nor carried
    /// off the road first.  Equals `root_time + call_duration` until the
    /// first handover; re-anchoring leaves it unchanged.
    #[inline]
    pub fn end_time(&self) -> SimTime {
        self.call_start + self.call_duration
    }

    /// `true` while the vehicle is on the covered road.
    #[inline]
    pub fn is_on_road(&self, hw: &Highway, t: SimTime) -> bool {
        hw.contains(self.absolute_position(hw, t))
    }

    /// `true` if `t` lies in `[root_time, end_time]` and the vehicle has not
    /// left the road.
    pub fn is_still_active(&self, hw: &Highway, t: SimTime) -> bool {
        self.root_time <= t && t <= self.end_time() && self.is_on_road(hw, t)
    }

    // ── Re-anchoring ──────────────────────────────────────────────────────

    /// A copy of this vehicle rooted at `t` on the edge of `station`'s cell
    /// that it has just crossed: the western edge when travelling east, the
    /// eastern edge when travelling west.
    ///
    /// Identity, velocity and call window are carried over unchanged.
    pub fn reanchored(&self, hw: &Highway, station: StationId, t: SimTime) -> Vehicle {
        let root_position = if self.velocity < 0.0 { hw.cell_diameter } else { 0.0 };
        Vehicle {
            root_position,
            root_station: station,
            root_time: t,
            ..*self
        }
    }
}
