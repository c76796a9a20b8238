//! `cs-vehicle`: where is a call's vehicle, and which station serves it?
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`vehicle`] | `Vehicle` - immutable root state + kinematic queries       |
//! | [`error`]   | `KinematicsError`, `KinematicsResult<T>`                   |
//!
//! # Movement model (closed form, evaluated lazily)
//!
//! A vehicle never stores a mutable position.  It stores the *root state*
//! `(root_station, root_position, root_time)` and a constant signed
//! velocity; its absolute position at any time `t` is
//!
//! ```text
//! position(t) = root_station * cell_diameter + root_position
//!             + velocity * (t - root_time)
//! ```
//!
//! Every query (current station, time to the next boundary, whether the
//! call is still active) is a pure function of the root state and `t`, so
//! a copy of a `Vehicle` taken at any point stays a faithful description of
//! that call's trajectory forever.  Handover produces a *new* value rooted
//! at the crossed boundary via [`Vehicle::reanchored`].

pub mod error;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use error::{KinematicsError, KinematicsResult};
pub use vehicle::{BOUNDARY_TOLERANCE, Vehicle};
