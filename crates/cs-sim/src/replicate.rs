//! Independent replications of one experiment.

use cs_core::{SimConfig, SimRng, SimTime};
use cs_variate::VariateConfig;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{CallStats, NoopObserver, SimBuilder, SimResult};

/// Final state of one replication.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicationSummary {
    pub index: u64,
    pub seed:  u64,
    /// Events dispatched, draining included.
    pub steps: u64,
    pub clock: SimTime,
    pub stats: CallStats,
}

/// Run `count` replications of `steps` events each, then drain every call
/// still in flight with arrivals switched off.
///
/// Replication `i` uses seed `SimRng::derive_seed(config.seed, i)` and owns
/// its own simulator, so results are the same whether or not the
/// `parallel` feature spreads them over Rayon's pool.  Summaries come back
/// in replication order.
pub fn run_replications(
    config:   &SimConfig,
    variates: &VariateConfig,
    count:    u64,
    steps:    u64,
) -> SimResult<Vec<ReplicationSummary>> {
    #[cfg(feature = "parallel")]
    let indices = (0..count).into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let indices = 0..count;

    indices
        .map(|index| replicate(config, variates, index, steps))
        .collect()
}

fn replicate(
    config:   &SimConfig,
    variates: &VariateConfig,
    index:    u64,
    steps:    u64,
) -> SimResult<ReplicationSummary> {
    let seed = SimRng::derive_seed(config.seed, index);
    let config = SimConfig { seed, ..config.clone() };
    let mut sim = SimBuilder::with_distributions(config, variates)?.build()?;
    sim.run(steps, &mut NoopObserver)?;
    sim.set_new_initiation(false);
    sim.run(u64::MAX, &mut NoopObserver)?;
    Ok(ReplicationSummary {
        index,
        seed,
        steps: sim.steps(),
        clock: sim.clock(),
        stats: sim.stats(),
    })
}
