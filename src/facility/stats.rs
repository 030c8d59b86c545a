use serde::Serialize;

use crate::types::SizeClass;

use super::metrics::MetricsSnapshot;
use super::state::FacilityState;

#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub slots: usize,
    pub occupied: usize,
    pub by_size: Vec<SizeStats>,
    pub active_reservations: usize,
    pub floor_edges: usize,
    pub bus_slots: usize,
    pub counters: Option<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SizeStats {
    pub size: SizeClass,
    pub total: usize,
    pub free: usize,
}

pub(crate) fn collect(state: &FacilityState, counters: Option<MetricsSnapshot>) -> StatsReport {
    let registry = state.registry();
    let by_size = SizeClass::ALL
        .into_iter()
        .map(|size| SizeStats {
            size,
            total: registry.all().filter(|slot| slot.size() == size).count(),
            free: registry.index().free_count(size),
        })
        .collect::<Vec<_>>();
    let free: usize = by_size.iter().map(|s| s.free).sum();
    StatsReport {
        slots: registry.len(),
        occupied: registry.len() - free,
        by_size,
        active_reservations: state.engine().active_count(),
        floor_edges: state.floor().edge_count(),
        bus_slots: state.options().bus_slots,
        counters,
    }
}
