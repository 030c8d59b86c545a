//! Slot storage: the registry of parking slots and its ordered index.
//!
//! The registry owns the index and updates it inside every mutation, which
//! keeps "first available" lookups consistent with occupancy at all times.

mod index;
mod registry;
mod slot;

pub use index::SlotIndex;
pub use registry::SlotRegistry;
pub use slot::{Slot, SlotStatus};
