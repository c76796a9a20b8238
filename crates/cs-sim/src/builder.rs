//! Fluent builder for constructing a [`Simulator`].

use cs_core::SimConfig;
use cs_variate::{DistributionSource, VariateConfig, VariateSource};

use crate::{SimResult, Simulator};

/// Fluent builder for [`Simulator<V>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: highway layout, channels, reservation, seed
/// - `V: VariateSource`: where new calls come from
///
/// # Optional inputs (have defaults)
///
/// | Method                      | Default                               |
/// |-----------------------------|---------------------------------------|
/// | `.without_initial_arrival()`| First arrival is drawn and scheduled  |
///
/// # Example
///
/// ```rust,ignore
/// let source = DistributionSource::new(&VariateConfig::default(), 42)?;
/// let mut sim = SimBuilder::new(SimConfig::default(), source).build()?;
/// sim.run(100_000, &mut NoopObserver)?;
/// ```
pub struct SimBuilder<V: VariateSource> {
    config:          SimConfig,
    variates:        V,
    initial_arrival: bool,
}

impl<V: VariateSource> SimBuilder<V> {
    pub fn new(config: SimConfig, variates: V) -> Self {
        Self { config, variates, initial_arrival: true }
    }

    /// Start with an empty queue.  Calls then only enter through
    /// [`Simulator::schedule_initiation`].
    pub fn without_initial_arrival(mut self) -> Self {
        self.initial_arrival = false;
        self
    }

    /// Validate the config and return a ready-to-run [`Simulator`].
    pub fn build(self) -> SimResult<Simulator<V>> {
        self.config.validate()?;
        let mut sim = Simulator::from_parts(self.config, self.variates);
        if self.initial_arrival {
            sim.schedule_arrival()?;
        }
        Ok(sim)
    }
}

impl SimBuilder<DistributionSource> {
    /// Builder whose calls are sampled from `variates`, seeded with
    /// `config.seed`.
    pub fn with_distributions(config: SimConfig, variates: &VariateConfig) -> SimResult<Self> {
        let source = DistributionSource::new(variates, config.seed)?;
        Ok(Self::new(config, source))
    }
}
