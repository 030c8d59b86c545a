//! Parking allocation core for a single facility.
//!
//! Tracks slots of varying sizes, reserves and releases them for vehicles,
//! answers hop-distance queries over the floor plan and sizes batches of
//! arrival/departure intervals. [`Facility`] is the entry point; the
//! [`command`] module is the textual interface used by the `parkade` binary.

#![forbid(unsafe_code)]

pub mod alloc;
pub mod command;
pub mod facility;
pub mod floor;
pub mod logging;
pub mod schedule;
pub mod storage;
pub mod types;

pub use command::{Command, Outcome};
pub use facility::{Facility, FacilityConfig, FacilityState};
pub use types::{ParkError, Result, SizeClass, SlotId, VehicleId, VehicleKind};
