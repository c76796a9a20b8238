//! `cs-sim`: discrete-event call admission and handover simulator.
//!
//! # Event protocol
//!
//! ```text
//! step():
//!   pop earliest event (FIFO among equal times); clock ← event.time
//!   Initiation  → draw + queue next arrival (if enabled)
//!                 off the road?           → queue Termination at exit
//!                 occupancy ≥ total − r?  → blocked
//!                 else take channel, queue follow-up
//!   Handover    → release departing channel
//!                 past the road edge?     → queue Termination now
//!                 occupancy ≥ total?      → dropped
//!                 else take channel, re-anchor, queue follow-up
//!   Termination → release channel (if held); completed
//!
//! follow-up: Handover at next boundary, or Termination at call end if
//!            that comes first (ties terminate)
//! ```
//!
//! Every admitted call has exactly one pending event until it is dropped or
//! completes, so nothing ever has to be cancelled.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`run_replications`] runs on Rayon's thread pool.      |
//! | `serde`    | Serde derives on records, stats and summaries.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_core::SimConfig;
//! use cs_sim::{EventLog, SimBuilder};
//! use cs_variate::VariateConfig;
//!
//! let config = SimConfig { reserved_for_handover: 1, seed: 7, ..SimConfig::default() };
//! let mut sim = SimBuilder::with_distributions(config, &VariateConfig::default())?.build()?;
//! let mut log = EventLog::new();
//! sim.run(10_000, &mut log)?;
//! println!("blocking {:.4}", sim.stats().blocking_probability());
//! ```

pub mod builder;
pub mod channels;
pub mod error;
pub mod observer;
pub mod record;
pub mod replicate;
pub mod sim;


pub use builder::SimBuilder;
pub use channels::ChannelTable;
pub use error::{SimError, SimResult};
pub use observer::{EventLog, NoopObserver, SimObserver};
pub use record::{CallStats, EventRecord, Outcome};
pub use replicate::{ReplicationSummary, run_replications};
pub use sim::{BOUNDARY_EPSILON, Simulator};
