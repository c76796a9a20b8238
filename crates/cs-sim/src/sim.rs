//! The `Simulator` struct and its event loop.

use rustc_hash::FxHashMap;
use tracing::{debug, error, info, trace, warn};

use cs_core::{Highway, SimConfig, SimTime, StationId, VehicleId};
use cs_event::{Event, EventKind, EventQueue};
use cs_variate::VariateSource;
use cs_vehicle::Vehicle;

use crate::{CallStats, ChannelTable, EventRecord, Outcome, SimBuilder, SimError, SimObserver, SimResult};

/// Seconds subtracted from the clock before asking which cell a departing
/// vehicle was in.  Handover and termination events fire exactly on a cell
/// boundary, where the kinematic lookup would already name the arriving cell.
pub const BOUNDARY_EPSILON: f64 = 1e-6;

// ── Simulator ─────────────────────────────────────────────────────────────────

/// The call admission and handover simulator.
///
/// Owns the event queue, the channel table, the counters and the variate
/// source; nothing else writes them.  Several simulators can coexist in one
/// process because vehicle ids come from a per-instance counter.
///
/// Which station holds a call's channel is recorded in `attachments` when
/// the channel is taken.  Releases use that record; the ε-corrected
/// kinematic lookup is only cross-checked against it.
///
/// Create via [`SimBuilder`] or [`Simulator::new`].
pub struct Simulator<V: VariateSource> {
    pub(crate) config:       SimConfig,
    pub(crate) variates:     V,
    pub(crate) clock:        SimTime,
    pub(crate) queue:        EventQueue,
    pub(crate) channels:     ChannelTable,
    /// Station currently holding each admitted call's channel.
    pub(crate) attachments:  FxHashMap<VehicleId, StationId>,
    pub(crate) stats:        CallStats,
    pub(crate) next_vehicle: VehicleId,
    pub(crate) steps:        u64,
    /// Set by the first fatal error; every later `step` refuses to run.
    pub(crate) poisoned:     bool,
}

impl<V: VariateSource> Simulator<V> {
    /// Build a simulator on the default cell layout (2 000 m cells) and
    /// schedule its first arrival.
    pub fn new(
        variates:              V,
        total_channels:        u32,
        station_count:         u32,
        reserved_for_handover: u32,
        enable_new_initiation: bool,
    ) -> SimResult<Self> {
        let config = SimConfig {
            highway: Highway { station_count, ..Highway::default() },
            total_channels,
            reserved_for_handover,
            enable_new_initiation,
            ..SimConfig::default()
        };
        SimBuilder::new(config, variates).build()
    }

    /// Bare simulator with an empty queue.  The config must already be valid.
    pub(crate) fn from_parts(config: SimConfig, variates: V) -> Self {
        let hw = config.highway;
        Self {
            channels:     ChannelTable::new(
                hw.station_count,
                config.total_channels,
                config.reserved_for_handover,
            ),
            config,
            variates,
            clock:        SimTime::ZERO,
            queue:        EventQueue::new(),
            attachments:  FxHashMap::default(),
            stats:        CallStats::default(),
            next_vehicle: VehicleId(0),
            steps:        0,
            poisoned:     false,
        }
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Dispatch up to `max_steps` events, stopping early only when the queue
    /// empties.  Returns the number of events dispatched.
    ///
    /// Equivalent to calling [`step`][Self::step] that many times and
    /// handing each record to `observer`.
    pub fn run<O: SimObserver>(&mut self, max_steps: u64, observer: &mut O) -> SimResult<u64> {
        let mut dispatched = 0;
        while dispatched < max_steps && !self.queue.is_empty() {
            let record = self.step()?;
            observer.on_event(&record);
            dispatched += 1;
        }
        self.finish_run(dispatched, observer);
        Ok(dispatched)
    }

    /// Dispatch every event scheduled at or before `end`.  Later events stay
    /// queued and the clock stays at the last dispatched event.
    pub fn run_until<O: SimObserver>(&mut self, end: SimTime, observer: &mut O) -> SimResult<u64> {
        let mut dispatched = 0;
        while let Some(next) = self.queue.peek_time() {
            if next > end {
                break;
            }
            let record = self.step()?;
            observer.on_event(&record);
            dispatched += 1;
        }
        self.finish_run(dispatched, observer);
        Ok(dispatched)
    }

    fn finish_run<O: SimObserver>(&self, dispatched: u64, observer: &mut O) {
        observer.on_run_end(self.clock, &self.stats);
        info!(
            dispatched,
            clock     = %self.clock,
            pending   = self.queue.len(),
            in_use    = self.channels.total_in_use(),
            admitted  = self.stats.admitted,
            blocked   = self.stats.blocked,
            dropped   = self.stats.dropped,
            completed = self.stats.completed,
            "run finished"
        );
    }

    /// Pop the earliest event, advance the clock to it and dispatch it.
    ///
    /// Fails with [`SimError::EmptyQueue`] if nothing is scheduled.  Any
    /// other error is fatal: the simulator is poisoned and every later call
    /// returns [`SimError::Poisoned`].
    pub fn step(&mut self) -> SimResult<EventRecord> {
        if self.poisoned {
            return Err(SimError::Poisoned);
        }
        let event = self.queue.pop_min()?;
        self.dispatch(event).inspect_err(|e| {
            error!(error = %e, clock = %self.clock, "simulator poisoned");
            self.poisoned = true;
        })
    }

    fn dispatch(&mut self, event: Event) -> SimResult<EventRecord> {
        if event.time < self.clock {
            return Err(SimError::ClockRegression {
                clock:      self.clock,
                event_time: event.time,
            });
        }
        self.clock = event.time;

        let outcome = match event.kind {
            EventKind::Initiation  => self.handle_initiation(event.vehicle)?,
            EventKind::Handover    => self.handle_handover(event.vehicle)?,
            EventKind::Termination => self.handle_termination(event.vehicle)?,
        };
        self.steps += 1;

        debug!(
            time    = %event.time,
            kind    = %event.kind,
            vehicle = %event.vehicle.id(),
            %outcome,
            "dispatched"
        );
        Ok(EventRecord {
            time:      event.time,
            kind:      event.kind,
            outcome,
            vehicle:   event.vehicle,
            blocked:   self.stats.blocked,
            dropped:   self.stats.dropped,
            completed: self.stats.completed,
        })
    }

    // ── Handlers ──────────────────────────────────────────────────────────

    fn handle_initiation(&mut self, vehicle: Vehicle) -> SimResult<Outcome> {
        // The next arrival is drawn first, whatever happens to this call.
        if self.config.enable_new_initiation {
            self.schedule_arrival()?;
        }

        let hw = self.config.highway;
        let now = self.clock;
        if !vehicle.is_on_road(&hw, now) {
            // Already out of range: it has crossed out as of now.
            self.schedule(now, EventKind::Termination, vehicle);
            return Ok(Outcome::InitiationSuccess);
        }

        let station = vehicle.root_station();
        if !self.channels.can_initiate(station) {
            self.stats.blocked += 1;
            return Ok(Outcome::InitiationBlocked);
        }
        self.attach(vehicle.id(), station)?;
        self.stats.admitted += 1;
        self.schedule_follow_up(vehicle)?;
        Ok(Outcome::InitiationSuccess)
    }

    fn handle_handover(&mut self, vehicle: Vehicle) -> SimResult<Outcome> {
        let hw = self.config.highway;
        let now = self.clock;
        let departing = self.detach(&vehicle)?;

        let Some(next) = hw.station(departing.0 as i64 + vehicle.direction()) else {
            // Carried off the end of the road.
            self.schedule(now, EventKind::Termination, vehicle);
            return Ok(Outcome::HandoverSuccess);
        };
        if !self.channels.can_hand_over(next) {
            self.stats.dropped += 1;
            return Ok(Outcome::HandoverDropped);
        }
        self.attach(vehicle.id(), next)?;
        self.schedule_follow_up(vehicle.reanchored(&hw, next, now))?;
        Ok(Outcome::HandoverSuccess)
    }

    fn handle_termination(&mut self, vehicle: Vehicle) -> SimResult<Outcome> {
        // Vehicles that never held a channel (started or drove off the
        // road) still complete, they just have nothing to release.
        if self.attachments.contains_key(&vehicle.id()) {
            self.detach(&vehicle)?;
        }
        self.stats.completed += 1;
        Ok(Outcome::Termination)
    }

    /// Schedule the one event that ends the vehicle's stay in its current
    /// cell: a handover at the next boundary, or termination if the call
    /// ends first.  A call ending exactly on the boundary terminates.
    fn schedule_follow_up(&mut self, vehicle: Vehicle) -> SimResult<()> {
        let now = self.clock;
        let to_boundary = vehicle.time_to_next_station(&self.config.highway, now)?;
        let remaining = vehicle.end_time() - now;
        if to_boundary >= remaining {
            self.schedule(vehicle.end_time(), EventKind::Termination, vehicle);
        } else {
            self.schedule(now + to_boundary, EventKind::Handover, vehicle);
        }
        Ok(())
    }

    // ── Channel bookkeeping ───────────────────────────────────────────────

    fn attach(&mut self, id: VehicleId, station: StationId) -> SimResult<()> {
        self.channels.acquire(station)?;
        self.attachments.insert(id, station);
        Ok(())
    }

    /// Release the channel `vehicle` holds and return its station.
    fn detach(&mut self, vehicle: &Vehicle) -> SimResult<StationId> {
        let id = vehicle.id();
        let station = self.attachments.remove(&id).ok_or(SimError::NotAttached(id))?;

        let probe = departure_probe(vehicle.root_time(), self.clock);
        let observed = vehicle.current_station(&self.config.highway, probe);
        if observed != station {
            warn!(
                vehicle = %id,
                attached = %station,
                %observed,
                clock = %self.clock,
                "kinematic station lookup disagrees with channel bookkeeping"
            );
        }

        self.channels.release(station)?;
        Ok(station)
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    pub(crate) fn schedule(&mut self, time: SimTime, kind: EventKind, vehicle: Vehicle) {
        trace!(%time, %kind, vehicle = %vehicle.id(), "scheduled");
        self.queue.push(time, kind, vehicle);
    }

    /// Draw the next arrival from the variate source and queue its initiation.
    ///
    /// Draw order is fixed: inter-arrival time, speed, direction, position,
    /// station, call duration.
    pub(crate) fn schedule_arrival(&mut self) -> SimResult<()> {
        let at = self.clock + self.variates.next_inter_arrival_time();
        let speed = self.variates.next_velocity();
        let direction = self.variates.next_direction();
        let position = self.variates.next_position();
        let station = self.variates.next_base_station();
        let duration = self.variates.next_call_duration();

        let id = self.allocate_id();
        let station = self.checked_station(id, station)?;
        let vehicle = Vehicle::new(id, speed * direction as f64, duration, position, station, at);
        self.schedule(at, EventKind::Initiation, vehicle);
        Ok(())
    }

    /// Queue a hand-built call to start at `at`.
    ///
    /// `velocity` is signed (positive travels towards higher station
    /// indices) and `position` is the offset within `station`'s cell.
    pub fn schedule_initiation(
        &mut self,
        at:            SimTime,
        velocity:      f64,
        call_duration: f64,
        position:      f64,
        station:       u32,
    ) -> SimResult<VehicleId> {
        if at < self.clock {
            return Err(SimError::ClockRegression { clock: self.clock, event_time: at });
        }
        let id = self.allocate_id();
        let station = self.checked_station(id, station)?;
        self.schedule(
            at,
            EventKind::Initiation,
            Vehicle::new(id, velocity, call_duration, position, station, at),
        );
        Ok(id)
    }

    /// Turn the self-sustaining arrival process on or off.  Switching it off
    /// lets a run drain: calls already queued finish, no new ones appear.
    pub fn set_new_initiation(&mut self, enabled: bool) {
        self.config.enable_new_initiation = enabled;
    }

    fn allocate_id(&mut self) -> VehicleId {
        let id = self.next_vehicle;
        self.next_vehicle = id.next();
        id
    }

    fn checked_station(&self, vehicle: VehicleId, station: u32) -> SimResult<StationId> {
        self.config
            .highway
            .station(station as i64)
            .ok_or(SimError::InvalidStation { vehicle, station })
    }

    // ── Read-only state ───────────────────────────────────────────────────

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn blocked(&self) -> u64 {
        self.stats.blocked
    }

    pub fn dropped(&self) -> u64 {
        self.stats.dropped
    }

    pub fn completed(&self) -> u64 {
        self.stats.completed
    }

    pub fn stats(&self) -> CallStats {
        self.stats
    }

    /// Occupied channels at `station`.
    ///
    /// # Panics
    /// Panics if `station` is not on the highway.
    pub fn occupancy(&self, station: StationId) -> u32 {
        self.channels.occupancy(station)
    }

    /// Occupancy of every station, west to east.
    pub fn occupancy_table(&self) -> &[u32] {
        self.channels.as_slice()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Events waiting in the queue.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Calls currently holding a channel.
    pub fn active_calls(&self) -> usize {
        self.attachments.len()
    }

    /// Events dispatched since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }
}

/// Instant at which to ask where a vehicle was just before `clock`.
///
/// Normally `clock - ε`; when the vehicle was re-rooted less than `2ε` ago
/// the midpoint of its stay is used instead, so the probe never falls
/// before `root_time`.
pub(crate) fn departure_probe(root_time: SimTime, clock: SimTime) -> SimTime {
    let elapsed = clock - root_time;
    if elapsed > 2.0 * BOUNDARY_EPSILON {
        clock.offset(-BOUNDARY_EPSILON)
    } else {
        root_time.offset(elapsed / 2.0)
    }
}
