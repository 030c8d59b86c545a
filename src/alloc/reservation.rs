use serde::Serialize;
use smallvec::SmallVec;

use crate::types::{ParkError, Result, SizeClass, SlotId, VehicleId, VehicleKind};

/// Inline capacity for held slots; buses need three.
pub(crate) const INLINE_SLOTS: usize = 4;

/// What a vehicle asks the allocation engine for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Demand {
    /// One slot of exactly this size.
    Single { size: SizeClass },
    /// A run of consecutive slots in the master ordering, any size.
    Contiguous { count: usize },
}

impl Demand {
    /// Demand for a vehicle of `kind` that declared `size`.
    ///
    /// Buses take `bus_slots` contiguous slots and the declared size is not
    /// inspected. Other kinds take one slot of the declared size.
    pub fn for_vehicle(kind: VehicleKind, size: &str, bus_slots: usize) -> Result<Self> {
        match kind {
            VehicleKind::Bus => {
                if bus_slots == 0 {
                    return Err(ParkError::InvalidArgument("bus slot count must be at least 1"));
                }
                Ok(Demand::Contiguous { count: bus_slots })
            }
            _ => Ok(Demand::Single {
                size: size.parse()?,
            }),
        }
    }

    /// Number of slots a successful allocation will hold.
    pub fn slot_count(&self) -> usize {
        match self {
            Demand::Single { .. } => 1,
            Demand::Contiguous { count } => *count,
        }
    }
}

/// Binding of a vehicle to the slots it currently holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reservation {
    /// Vehicle holding the slots.
    pub vehicle: VehicleId,
    /// Held slots, in master ordering.
    pub slots: SmallVec<[SlotId; INLINE_SLOTS]>,
    /// The request that produced this reservation.
    pub demand: Demand,
}
