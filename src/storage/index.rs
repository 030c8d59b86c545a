use std::collections::{BTreeMap, BTreeSet};

use crate::types::{ParkError, Result, SizeClass, SlotId};

use super::slot::Slot;

/// Ordered index over the slot registry.
///
/// Maps identifiers to positions in the master ordering and keeps one ordered
/// free set per size class. The registry updates the free sets inside every
/// occupy/vacate, so "first available" lookups are always current without a
/// rebuild.
#[derive(Clone, Debug, Default)]
pub struct SlotIndex {
    positions: BTreeMap<SlotId, usize>,
    free: [BTreeSet<SlotId>; 3],
}

impl SlotIndex {
    pub(crate) fn build(slots: &[Slot]) -> Result<Self> {
        let mut index = SlotIndex::default();
        for (pos, slot) in slots.iter().enumerate() {
            if index.positions.insert(slot.id(), pos).is_some() {
                return Err(ParkError::DuplicateSlot(slot.id()));
            }
            if !slot.is_occupied() {
                index.free[slot.size().ordinal()].insert(slot.id());
            }
        }
        Ok(index)
    }

    /// Position of `id` in the master ordering.
    pub fn position_of(&self, id: SlotId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Lowest-identifier free slot of the given size.
    pub fn first_available(&self, size: SizeClass) -> Option<SlotId> {
        self.free[size.ordinal()].first().copied()
    }

    /// Number of free slots of the given size.
    pub fn free_count(&self, size: SizeClass) -> usize {
        self.free[size.ordinal()].len()
    }

    /// All indexed identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.positions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub(crate) fn mark_occupied(&mut self, id: SlotId, size: SizeClass) {
        self.free[size.ordinal()].remove(&id);
    }

    pub(crate) fn mark_free(&mut self, id: SlotId, size: SizeClass) {
        self.free[size.ordinal()].insert(id);
    }
}
