use serde::Serialize;

use crate::types::{SizeClass, SlotId, VehicleId};

/// A single parking space.
///
/// Occupancy is derived from the occupant: a slot is occupied exactly when it
/// records a vehicle, so the two can never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    id: SlotId,
    size: SizeClass,
    occupant: Option<VehicleId>,
}

impl Slot {
    pub(crate) fn new(id: SlotId, size: SizeClass) -> Self {
        Self {
            id,
            size,
            occupant: None,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn size(&self) -> SizeClass {
        self.size
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Vehicle currently parked here, if any.
    pub fn occupant(&self) -> Option<&VehicleId> {
        self.occupant.as_ref()
    }

    pub(crate) fn set_occupant(&mut self, vehicle: VehicleId) {
        self.occupant = Some(vehicle);
    }

    pub(crate) fn take_occupant(&mut self) -> Option<VehicleId> {
        self.occupant.take()
    }

    /// Point-in-time view suitable for display or serialisation.
    pub fn status(&self) -> SlotStatus {
        SlotStatus {
            id: self.id,
            size: self.size,
            occupied: self.is_occupied(),
            occupant: self.occupant.clone(),
        }
    }
}

/// Snapshot of one slot as reported by listing operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    /// Slot identifier.
    pub id: SlotId,
    /// Size class of the slot.
    pub size: SizeClass,
    /// Whether a vehicle is parked in the slot.
    pub occupied: bool,
    /// Vehicle parked in the slot, `None` when free.
    pub occupant: Option<VehicleId>,
}
