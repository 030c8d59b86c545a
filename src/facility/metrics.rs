use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Trait for tracking facility operations.
///
/// Implementations receive one callback per completed core operation. They
/// are invoked while the facility lock is held, so they must not block.
pub trait FacilityMetrics: Send + Sync {
    /// Records a committed allocation holding `slots` slots.
    fn allocation_committed(&self, slots: usize);

    /// Records a rejected allocation.
    ///
    /// # Parameters
    /// * `reason` - Error kind label, e.g. `"no_capacity"`.
    fn allocation_rejected(&self, reason: &'static str);

    /// Records a committed release that freed `slots` slots.
    fn release_committed(&self, slots: usize);

    /// Records a release for a vehicle with no reservation.
    fn release_rejected(&self);

    /// Records a hop-count or route query.
    fn hop_query(&self, reachable: bool);

    /// Records a schedule optimisation over `intervals` stays.
    fn schedule_run(&self, intervals: usize);

    /// Current counter values, when the implementation keeps any.
    fn snapshot(&self) -> Option<MetricsSnapshot> {
        None
    }
}

/// A no-op implementation of [`FacilityMetrics`].
#[derive(Default)]
pub struct NoopMetrics;

impl FacilityMetrics for NoopMetrics {
    fn allocation_committed(&self, _slots: usize) {}
    fn allocation_rejected(&self, _reason: &'static str) {}
    fn release_committed(&self, _slots: usize) {}
    fn release_rejected(&self) {}
    fn hop_query(&self, _reachable: bool) {}
    fn schedule_run(&self, _intervals: usize) {}
}

/// Atomic counter implementation of [`FacilityMetrics`].
#[derive(Default)]
pub struct CounterMetrics {
    /// Allocations committed.
    pub allocations: AtomicU64,
    /// Slots handed out across all allocations.
    pub slots_allocated: AtomicU64,
    /// Allocations rejected because no slot or window was free.
    pub rejected_no_capacity: AtomicU64,
    /// Allocations rejected for any other reason.
    pub rejected_other: AtomicU64,
    /// Releases committed.
    pub releases: AtomicU64,
    /// Slots returned across all releases.
    pub slots_released: AtomicU64,
    /// Releases for vehicles that were not parked.
    pub releases_rejected: AtomicU64,
    /// Hop or route queries answered.
    pub hop_queries: AtomicU64,
    /// Hop or route queries whose endpoints were disconnected.
    pub hop_queries_unreachable: AtomicU64,
    /// Schedule optimisations run.
    pub schedule_runs: AtomicU64,
}

impl FacilityMetrics for CounterMetrics {
    fn allocation_committed(&self, slots: usize) {
        self.allocations.fetch_add(1, Ordering::Relaxed);
        self.slots_allocated
            .fetch_add(slots as u64, Ordering::Relaxed);
    }

    fn allocation_rejected(&self, reason: &'static str) {
        if reason == "no_capacity" {
            self.rejected_no_capacity.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected_other.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn release_committed(&self, slots: usize) {
        self.releases.fetch_add(1, Ordering::Relaxed);
        self.slots_released.fetch_add(slots as u64, Ordering::Relaxed);
    }

    fn release_rejected(&self) {
        self.releases_rejected.fetch_add(1, Ordering::Relaxed);
    }

    fn hop_query(&self, reachable: bool) {
        self.hop_queries.fetch_add(1, Ordering::Relaxed);
        if !reachable {
            self.hop_queries_unreachable.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn schedule_run(&self, _intervals: usize) {
        self.schedule_runs.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> Option<MetricsSnapshot> {
        Some(MetricsSnapshot {
            allocations: self.allocations.load(Ordering::Relaxed),
            slots_allocated: self.slots_allocated.load(Ordering::Relaxed),
            rejected_no_capacity: self.rejected_no_capacity.load(Ordering::Relaxed),
            rejected_other: self.rejected_other.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            slots_released: self.slots_released.load(Ordering::Relaxed),
            releases_rejected: self.releases_rejected.load(Ordering::Relaxed),
            hop_queries: self.hop_queries.load(Ordering::Relaxed),
            hop_queries_unreachable: self.hop_queries_unreachable.load(Ordering::Relaxed),
            schedule_runs: self.schedule_runs.load(Ordering::Relaxed),
        })
    }
}

/// Plain copy of [`CounterMetrics`] values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub allocations: u64,
    pub slots_allocated: u64,
    pub rejected_no_capacity: u64,
    pub rejected_other: u64,
    pub releases: u64,
    pub slots_released: u64,
    pub releases_rejected: u64,
    pub hop_queries: u64,
    pub hop_queries_unreachable: u64,
    pub schedule_runs: u64,
}
