//! `cs-core`: foundational types for the `cellsim` handover simulator.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `StationId`                              |
//! | [`highway`]     | `Highway` - cell geometry of the linear road          |
//! | [`time`]        | `SimTime` - continuous logical time in seconds        |
//! | [`config`]      | `SimConfig` - channel capacity and arrival policy     |
//! | [`rng`]         | `SimRng` - seeded deterministic RNG                   |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod highway;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use highway::Highway;
pub use ids::{StationId, VehicleId};
pub use rng::SimRng;
pub use time::SimTime;
