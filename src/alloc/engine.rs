use std::collections::BTreeMap;
use std::ops::Range;

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::storage::SlotRegistry;
use crate::types::{ParkError, Result, SlotId, VehicleId};

use super::reservation::{Demand, Reservation};

/// Finds, commits and releases reservations against a [`SlotRegistry`].
///
/// The engine owns the vehicle → reservation table; the registry owns slot
/// occupancy. Every held slot of a reservation records that reservation's
/// vehicle as its occupant.
#[derive(Clone, Debug, Default)]
pub struct AllocationEngine {
    reservations: BTreeMap<VehicleId, Reservation>,
}

impl AllocationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves slots for `vehicle` and returns them in master ordering.
    ///
    /// Fails with `AlreadyParked` before looking at capacity. On any failure
    /// no slot is touched.
    pub fn allocate(
        &mut self,
        registry: &mut SlotRegistry,
        vehicle: &VehicleId,
        demand: Demand,
    ) -> Result<Vec<SlotId>> {
        if self.reservations.contains_key(vehicle) {
            return Err(ParkError::AlreadyParked(vehicle.clone()));
        }
        let slots: SmallVec<[SlotId; super::reservation::INLINE_SLOTS]> = match demand {
            Demand::Single { size } => {
                let slot = registry.first_available(size).ok_or(ParkError::NoCapacity)?;
                smallvec::smallvec![slot.id()]
            }
            Demand::Contiguous { count } => {
                let window = first_free_window(registry, count).ok_or(ParkError::NoCapacity)?;
                window
                    .filter_map(|pos| registry.at(pos).map(|slot| slot.id()))
                    .collect()
            }
        };
        registry.occupy_all(&slots, vehicle)?;
        debug!(
            vehicle = %vehicle,
            slots = ?slots.as_slice(),
            "alloc.allocate.committed"
        );
        let held = slots.to_vec();
        self.reservations.insert(
            vehicle.clone(),
            Reservation {
                vehicle: vehicle.clone(),
                slots,
                demand,
            },
        );
        Ok(held)
    }

    /// Releases every slot held by `vehicle` and forgets the reservation.
    ///
    /// Slots whose occupant no longer matches `vehicle` are left untouched and
    /// reported with a warning. Returns the slots actually freed.
    pub fn release(
        &mut self,
        registry: &mut SlotRegistry,
        vehicle: &VehicleId,
    ) -> Result<Vec<SlotId>> {
        let reservation = self
            .reservations
            .remove(vehicle)
            .ok_or_else(|| ParkError::NotParked(vehicle.clone()))?;
        let mut freed = Vec::with_capacity(reservation.slots.len());
        for id in reservation.slots {
            let owner = registry.get(id).ok().and_then(|slot| slot.occupant().cloned());
            if owner.as_ref() != Some(vehicle) {
                warn!(
                    vehicle = %vehicle,
                    slot = id.0,
                    occupant = owner.as_ref().map(VehicleId::as_str),
                    "alloc.release.occupant_mismatch"
                );
                continue;
            }
            if registry.vacate(id).is_ok() {
                freed.push(id);
            }
        }
        debug!(vehicle = %vehicle, slots = ?freed, "alloc.release.committed");
        Ok(freed)
    }

    pub fn reservation(&self, vehicle: &VehicleId) -> Option<&Reservation> {
        self.reservations.get(vehicle)
    }

    /// Active reservations ordered by vehicle id.
    pub fn reservations(&self) -> impl Iterator<Item = &Reservation> + '_ {
        self.reservations.values()
    }

    pub fn active_count(&self) -> usize {
        self.reservations.len()
    }
}

/// First run of `count` consecutive free positions, scanning from position 0.
///
/// A blocked position rules out every window that covers it, so the scan
/// resumes just past it.
fn first_free_window(registry: &SlotRegistry, count: usize) -> Option<Range<usize>> {
    let len = registry.len();
    if count == 0 || count > len {
        return None;
    }
    let mut start = 0;
    while start + count <= len {
        match (start..start + count).find(|&pos| !registry.is_free_at(pos)) {
            None => return Some(start..start + count),
            Some(blocked) => start = blocked + 1,
        }
    }
    None
}
