use tracing::trace;

use crate::types::{ParkError, Result, SizeClass, SlotId, VehicleId};

use super::index::SlotIndex;
use super::slot::Slot;

/// Authoritative collection of parking slots.
///
/// Slots are stored in the master ordering, which is ascending by identifier.
/// The position of a slot in that ordering is what contiguous allocation and
/// the floor graph refer to.
#[derive(Clone, Debug)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
    index: SlotIndex,
}

impl SlotRegistry {
    /// Builds the registry from `(id, size)` pairs listed in ascending id order.
    pub fn create<I>(layout: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SlotId, SizeClass)>,
    {
        let mut slots: Vec<Slot> = Vec::new();
        for (id, size) in layout {
            if id.0 == 0 {
                return Err(ParkError::InvalidLayout("slot ids must be positive"));
            }
            if let Some(prev) = slots.last() {
                if prev.id() == id {
                    return Err(ParkError::DuplicateSlot(id));
                }
                if prev.id() > id {
                    return Err(ParkError::InvalidLayout(
                        "slot ids must be listed in ascending order",
                    ));
                }
            }
            slots.push(Slot::new(id, size));
        }
        if slots.is_empty() {
            return Err(ParkError::InvalidLayout("facility has no slots"));
        }
        let index = SlotIndex::build(&slots)?;
        Ok(Self { slots, index })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn index(&self) -> &SlotIndex {
        &self.index
    }

    pub fn get(&self, id: SlotId) -> Result<&Slot> {
        self.index
            .position_of(id)
            .map(|pos| &self.slots[pos])
            .ok_or(ParkError::NotFound(id))
    }

    /// Slot at `position` in the master ordering.
    pub fn at(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    pub fn position_of(&self, id: SlotId) -> Option<usize> {
        self.index.position_of(id)
    }

    /// Iterates every slot in ascending id order. Call again to restart.
    pub fn all(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Lowest-identifier free slot of `size`.
    pub fn first_available(&self, size: SizeClass) -> Option<&Slot> {
        self.index
            .first_available(size)
            .and_then(|id| self.get(id).ok())
    }

    pub fn occupy(&mut self, id: SlotId, vehicle: &VehicleId) -> Result<()> {
        self.occupy_all(&[id], vehicle)
    }

    /// Occupies every slot in `ids` or none of them.
    pub fn occupy_all(&mut self, ids: &[SlotId], vehicle: &VehicleId) -> Result<()> {
        let mut positions = Vec::with_capacity(ids.len());
        for &id in ids {
            let pos = self.index.position_of(id).ok_or(ParkError::NotFound(id))?;
            if self.slots[pos].is_occupied() || positions.contains(&pos) {
                return Err(ParkError::AlreadyOccupied(id));
            }
            positions.push(pos);
        }
        for pos in positions {
            let slot = &mut self.slots[pos];
            slot.set_occupant(vehicle.clone());
            self.index.mark_occupied(slot.id(), slot.size());
            trace!(slot = slot.id().0, vehicle = %vehicle, "registry.occupy");
        }
        Ok(())
    }

    /// Frees `id`, returning the vehicle that was parked there.
    pub fn vacate(&mut self, id: SlotId) -> Result<VehicleId> {
        let pos = self.index.position_of(id).ok_or(ParkError::NotFound(id))?;
        let slot = &mut self.slots[pos];
        let vehicle = slot.take_occupant().ok_or(ParkError::NotOccupied(id))?;
        self.index.mark_free(slot.id(), slot.size());
        trace!(slot = id.0, vehicle = %vehicle, "registry.vacate");
        Ok(vehicle)
    }

    pub(crate) fn is_free_at(&self, position: usize) -> bool {
        self.slots
            .get(position)
            .is_some_and(|slot| !slot.is_occupied())
    }
}
