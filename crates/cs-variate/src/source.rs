//! The `VariateSource` trait: the simulator's only source of randomness.

/// Pluggable supplier of per-call random quantities.
///
/// Implementations must be deterministic given their seed and the order of
/// calls.  The simulator calls them in a fixed order whenever it creates a
/// vehicle: inter-arrival time, velocity, direction, position, base station,
/// call duration.
///
/// Units: seconds for times, metres per second for velocity, metres for
/// positions (an offset inside the station's cell).
pub trait VariateSource {
    /// Gap between this arrival and the next one.
    fn next_inter_arrival_time(&mut self) -> f64;

    /// Speed of the vehicle.  The simulator multiplies it by the direction.
    fn next_velocity(&mut self) -> f64;

    /// `1` for eastbound (increasing station index), `-1` for westbound.
    fn next_direction(&mut self) -> i64;

    /// Offset of the vehicle inside its initial cell.
    fn next_position(&mut self) -> f64;

    /// Station serving the vehicle when the call is placed.
    fn next_base_station(&mut self) -> u32;

    /// Total call length.
    fn next_call_duration(&mut self) -> f64;
}

impl<V: VariateSource + ?Sized> VariateSource for Box<V> {
    fn next_inter_arrival_time(&mut self) -> f64 {
        (**self).next_inter_arrival_time()
    }

    fn next_velocity(&mut self) -> f64 {
        (**self).next_velocity()
    }

    fn next_direction(&mut self) -> i64 {
        (**self).next_direction()
    }

    fn next_position(&mut self) -> f64 {
        (**self).next_position()
    }

    fn next_base_station(&mut self) -> u32 {
        (**self).next_base_station()
    }

    fn next_call_duration(&mut self) -> f64 {
        (**self).next_call_duration()
    }
}

/// A [`VariateSource`] that returns the same values forever.
///
/// Useful in tests where the traffic pattern must be known exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantSource {
    pub inter_arrival_time: f64,
    pub velocity:           f64,
    pub direction:          i64,
    pub position:           f64,
    pub base_station:       u32,
    pub call_duration:      f64,
}

impl Default for ConstantSource {
    fn default() -> Self {
        Self {
            inter_arrival_time: 1.0,
            velocity:           16.0,
            direction:          1,
            position:           0.0,
            base_station:       5,
            call_duration:      120.0,
        }
    }
}

impl VariateSource for ConstantSource {
    fn next_inter_arrival_time(&mut self) -> f64 {
        self.inter_arrival_time
    }

    fn next_velocity(&mut self) -> f64 {
        self.velocity
    }

    fn next_direction(&mut self) -> i64 {
        self.direction
    }

    fn next_position(&mut self) -> f64 {
        self.position
    }

    fn next_base_station(&mut self) -> u32 {
        self.base_station
    }

    fn next_call_duration(&mut self) -> f64 {
        self.call_duration
    }
}
