//! Reservation of parking slots.
//!
//! Single-slot demands take the lowest-id free slot of the requested size.
//! Multi-slot demands take the first run of consecutive free positions,
//! regardless of size.

mod engine;
mod reservation;

pub use engine::AllocationEngine;
pub use reservation::{Demand, Reservation};
