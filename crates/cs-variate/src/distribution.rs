//! Seeded, configurable [`VariateSource`] backed by `rand_distr`.
//!
//! | Quantity       | Distribution                                   |
//! |----------------|------------------------------------------------|
//! | inter-arrival  | `Exp(inter_arrival_rate)`                      |
//! | call duration  | `call_duration_min + Exp(call_duration_rate)`  |
//! | velocity       | `Normal(mean, sqrt(variance))` km/h, as m/s    |
//! | direction      | `-1` or `1`, equally likely                    |
//! | base station   | discrete uniform `[min, max]`                  |
//! | position       | continuous uniform `[min, max)`                |

use cs_core::{Highway, SimRng};
use rand::Rng;
use rand_distr::{Exp, Normal};

use crate::{VariateError, VariateResult, VariateSource};

const KMH_PER_MPS: f64 = 3.6;

/// Distribution parameters.  Defaults describe the reference highway
/// (20 stations of 2 km).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariateConfig {
    /// Arrivals per second.
    pub inter_arrival_rate:    f64,
    /// Shortest possible call, in seconds.
    pub call_duration_min:     f64,
    /// Rate of the exponential excess over `call_duration_min`, per second.
    pub call_duration_rate:    f64,
    /// Mean vehicle speed, km/h.
    pub velocity_mean_kmh:     f64,
    /// Variance of vehicle speed, (km/h)².
    pub velocity_variance_kmh: f64,
    pub base_station_min:      u32,
    /// Inclusive.
    pub base_station_max:      u32,
    /// Metres into the cell.
    pub position_min:          f64,
    /// Exclusive.
    pub position_max:          f64,
}

impl Default for VariateConfig {
    fn default() -> Self {
        Self {
            inter_arrival_rate:    1.0 / 1.369,
            call_duration_min:     10.0,
            call_duration_rate:    1.0 / 99.83,
            velocity_mean_kmh:     120.072,
            velocity_variance_kmh: 81.335,
            base_station_min:      0,
            base_station_max:      19,
            position_min:          0.0,
            position_max:          2_000.0,
        }
    }
}

impl VariateConfig {
    /// Spread arrivals uniformly over every cell of `hw`.
    pub fn for_highway(hw: &Highway) -> Self {
        Self {
            base_station_min: 0,
            base_station_max: hw.station_count.saturating_sub(1),
            position_min:     0.0,
            position_max:     hw.cell_diameter,
            ..Self::default()
        }
    }
}

/// The production variate source: one seeded RNG driving every
/// distribution, so a seed fixes the entire traffic pattern.
pub struct DistributionSource {
    rng:               SimRng,
    inter_arrival:     Exp<f64>,
    call_excess:       Exp<f64>,
    call_duration_min: f64,
    velocity_kmh:      Normal<f64>,
    base_station_min:  u32,
    base_station_max:  u32,
    position_min:      f64,
    position_max:      f64,
}

impl DistributionSource {
    /// Validate `config` and seed the RNG.
    pub fn new(config: &VariateConfig, seed: u64) -> VariateResult<Self> {
        let inter_arrival = exp("inter_arrival_rate", config.inter_arrival_rate)?;
        let call_excess = exp("call_duration_rate", config.call_duration_rate)?;

        if !(config.call_duration_min.is_finite() && config.call_duration_min >= 0.0) {
            return Err(invalid(
                "call_duration_min",
                format!("must be finite and non-negative, got {}", config.call_duration_min),
            ));
        }

        let std_dev = config.velocity_variance_kmh.sqrt();
        let velocity_kmh = Normal::new(config.velocity_mean_kmh, std_dev)
            .map_err(|e| invalid("velocity", e.to_string()))?;

        if config.base_station_min > config.base_station_max {
            return Err(invalid(
                "base_station",
                format!("empty range {}..={}", config.base_station_min, config.base_station_max),
            ));
        }
        if !(config.position_min < config.position_max) {
            return Err(invalid(
                "position",
                format!("empty range {}..{}", config.position_min, config.position_max),
            ));
        }

        Ok(Self {
            rng: SimRng::new(seed),
            inter_arrival,
            call_excess,
            call_duration_min: config.call_duration_min,
            velocity_kmh,
            base_station_min: config.base_station_min,
            base_station_max: config.base_station_max,
            position_min: config.position_min,
            position_max: config.position_max,
        })
    }
}

impl VariateSource for DistributionSource {
    fn next_inter_arrival_time(&mut self) -> f64 {
        self.rng.inner().sample(self.inter_arrival)
    }

    fn next_velocity(&mut self) -> f64 {
        self.rng.inner().sample(self.velocity_kmh) / KMH_PER_MPS
    }

    fn next_direction(&mut self) -> i64 {
        if self.rng.gen_bool(0.5) { 1 } else { -1 }
    }

    fn next_position(&mut self) -> f64 {
        self.rng.gen_range(self.position_min..self.position_max)
    }

    fn next_base_station(&mut self) -> u32 {
        self.rng.gen_range(self.base_station_min..=self.base_station_max)
    }

    fn next_call_duration(&mut self) -> f64 {
        self.call_duration_min + self.rng.inner().sample(self.call_excess)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn exp(name: &'static str, rate: f64) -> VariateResult<Exp<f64>> {
    if !(rate.is_finite() && rate > 0.0) {
        return Err(invalid(name, format!("rate must be positive and finite, got {rate}")));
    }
    Exp::new(rate).map_err(|e| invalid(name, e.to_string()))
}

fn invalid(name: &'static str, reason: String) -> VariateError {
    VariateError::InvalidParameter { name, reason }
}
