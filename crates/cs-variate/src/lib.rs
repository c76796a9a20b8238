//! `cs-variate`: where new calls come from.
//!
//! The simulator never samples a distribution itself.  It asks a
//! [`VariateSource`] for six independent quantities, in a fixed order, each
//! time it creates a vehicle.  Swapping the source changes the traffic
//! model without touching the simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`source`]  | `VariateSource` trait, `ConstantSource`                    |
//! | [`distribution`] | `VariateConfig`, `DistributionSource` (seeded)        |
//! | [`error`]   | `VariateError`, `VariateResult<T>`                         |

pub mod distribution;
pub mod error;
pub mod source;

#[cfg(test)]
mod tests;

pub use distribution::{DistributionSource, VariateConfig};
pub use error::{VariateError, VariateResult};
pub use source::{ConstantSource, VariateSource};
