//! Top-level simulation configuration.

use crate::{CoreError, CoreResult, Highway};

/// Channels per base station in the reference network.
pub const DEFAULT_TOTAL_CHANNELS: u32 = 10;

/// Everything the simulator needs besides its variate source.
///
/// Typically built in code by the application crate; the optional `serde`
/// derives let callers embed it in their own config formats.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Cell layout of the road.
    pub highway: Highway,

    /// Channels per base station.
    pub total_channels: u32,

    /// Channels per station that new calls may not take; only handovers may
    /// use them.  Must be less than `total_channels`.
    pub reserved_for_handover: u32,

    /// When `true`, every dispatched initiation schedules the next arrival,
    /// keeping the arrival process running indefinitely.
    pub enable_new_initiation: bool,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            highway:               Highway::default(),
            total_channels:        DEFAULT_TOTAL_CHANNELS,
            reserved_for_handover: 0,
            enable_new_initiation: true,
            seed:                  0,
        }
    }
}

impl SimConfig {
    /// Reject layouts the simulator cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        let d = self.highway.cell_diameter;
        if !(d.is_finite() && d > 0.0) {
            return Err(CoreError::Config(format!(
                "cell diameter must be positive and finite, got {d}"
            )));
        }
        if self.highway.station_count == 0 {
            return Err(CoreError::Config("station count must be non-zero".into()));
        }
        if self.total_channels == 0 {
            return Err(CoreError::Config("total channels must be non-zero".into()));
        }
        if self.reserved_for_handover >= self.total_channels {
            return Err(CoreError::Config(format!(
                "{} reserved channels leave none of {} for new calls",
                self.reserved_for_handover, self.total_channels
            )));
        }
        Ok(())
    }
}
