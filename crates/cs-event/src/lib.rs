//! `cs-event`: call events and the queue that orders them.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`event`] | `EventKind`, `Event`                                      |
//! | [`queue`] | `EventQueue` (`BinaryHeap` keyed on time + sequence)      |
//! | [`error`] | `EventError`, `EventResult<T>`                            |
//!
//! # Ordering
//!
//! Events pop in ascending time.  Events scheduled for the same instant pop
//! in the order they were pushed, so a run is reproducible no matter how
//! many events share a timestamp.
//!
//! There is no cancel or update: the simulator only ever schedules the one
//! event that will actually fire for a vehicle.

pub mod error;
pub mod event;
pub mod queue;


pub use error::{EventError, EventResult};
pub use event::{Event, EventKind};
pub use queue::EventQueue;
