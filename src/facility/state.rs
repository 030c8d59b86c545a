use serde::Serialize;

use crate::alloc::{AllocationEngine, Demand, Reservation};
use crate::floor::FloorGraph;
use crate::storage::{SlotRegistry, SlotStatus};
use crate::types::{ParkError, Result, SizeClass, SlotId, VehicleId, VehicleKind};

use super::config::{EngineOptions, FacilityConfig};

/// Free slot closest (in hops) to a starting slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NearestSlot {
    pub slot: SlotId,
    pub hops: u32,
}

/// All parking state of one facility.
///
/// Owns the slot registry, the reservation table and the floor graph. The
/// graph has one node per registry position.
#[derive(Clone, Debug)]
pub struct FacilityState {
    registry: SlotRegistry,
    engine: AllocationEngine,
    floor: FloorGraph,
    options: EngineOptions,
}

impl FacilityState {
    pub fn new(registry: SlotRegistry, floor: FloorGraph, options: EngineOptions) -> Result<Self> {
        if floor.len() != registry.len() {
            return Err(ParkError::InvalidLayout(
                "floor graph must have one node per slot",
            ));
        }
        if options.bus_slots == 0 {
            return Err(ParkError::InvalidLayout("bus_slots must be at least 1"));
        }
        Ok(Self {
            registry,
            engine: AllocationEngine::new(),
            floor,
            options,
        })
    }

    pub fn from_config(config: &FacilityConfig) -> Result<Self> {
        Self::new(config.build_registry()?, config.build_floor()?, config.engine)
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    pub fn floor(&self) -> &FloorGraph {
        &self.floor
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Every slot, ascending by id.
    pub fn list_slots(&self) -> Vec<SlotStatus> {
        self.registry.all().map(|slot| slot.status()).collect()
    }

    /// Parks `vehicle` of `kind` that declared `size`.
    ///
    /// A vehicle that already holds a reservation gets `AlreadyParked` before
    /// its kind and size are inspected.
    pub fn allocate(&mut self, vehicle: &str, size: &str, kind: &str) -> Result<Vec<SlotId>> {
        let vehicle = VehicleId::new(vehicle)?;
        if self.engine.reservation(&vehicle).is_some() {
            return Err(ParkError::AlreadyParked(vehicle));
        }
        let kind: VehicleKind = kind.parse()?;
        let demand = Demand::for_vehicle(kind, size, self.options.bus_slots)?;
        self.allocate_demand(&vehicle, demand)
    }

    pub fn allocate_demand(&mut self, vehicle: &VehicleId, demand: Demand) -> Result<Vec<SlotId>> {
        self.engine.allocate(&mut self.registry, vehicle, demand)
    }

    /// Frees every slot held by `vehicle`. A blank id never holds a
    /// reservation, so it reports `NotParked`.
    pub fn release(&mut self, vehicle: &str) -> Result<Vec<SlotId>> {
        let Ok(vehicle) = VehicleId::new(vehicle) else {
            return Err(ParkError::NotParked(VehicleId::unvalidated(vehicle)));
        };
        self.engine.release(&mut self.registry, &vehicle)
    }

    /// Hops between two slots addressed by 1-based position.
    pub fn shortest_hops(&self, src: u32, dest: u32) -> Result<u32> {
        let (src, dest) = (self.position(src)?, self.position(dest)?);
        self.floor.shortest_hops(src, dest)
    }

    /// Slots along one shortest route between two 1-based positions.
    pub fn shortest_path(&self, src: u32, dest: u32) -> Result<Vec<SlotId>> {
        let (src, dest) = (self.position(src)?, self.position(dest)?);
        let route = self.floor.shortest_path(src, dest)?;
        Ok(route
            .into_iter()
            .filter_map(|pos| self.registry.at(pos).map(|slot| slot.id()))
            .collect())
    }

    /// Closest free slot of `size` to the slot at 1-based position `from`.
    ///
    /// Ties on hop count go to the lower slot id. `None` when no reachable
    /// slot of that size is free.
    pub fn nearest_available(&self, from: u32, size: SizeClass) -> Result<Option<NearestSlot>> {
        let start = self.position(from)?;
        let visits = self.floor.bfs(start, u32::MAX)?;
        Ok(visits
            .into_iter()
            .filter_map(|visit| {
                self.registry
                    .at(visit.position)
                    .filter(|slot| !slot.is_occupied() && slot.size() == size)
                    .map(|slot| NearestSlot {
                        slot: slot.id(),
                        hops: visit.depth,
                    })
            })
            .min_by_key(|nearest| (nearest.hops, nearest.slot)))
    }

    pub fn reservation(&self, vehicle: &str) -> Option<&Reservation> {
        let vehicle = VehicleId::new(vehicle).ok()?;
        self.engine.reservation(&vehicle)
    }

    fn position(&self, slot: u32) -> Result<usize> {
        let len = self.registry.len();
        match slot as usize {
            pos if pos >= 1 && pos <= len => Ok(pos - 1),
            _ => Err(ParkError::OutOfRange { slot, len }),
        }
    }
}
