//! The facility: shared parking state behind a single reader/writer lock.
//!
//! [`Facility`] is a cheap, cloneable handle. Allocation and release hold the
//! write lock for the whole operation; queries hold the read lock, so no
//! caller ever observes a half-applied reservation.

mod config;
mod metrics;
mod state;
mod stats;

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::alloc::Reservation;
use crate::command::{Command, Outcome, HELP};
use crate::schedule::{self, Interval};
use crate::storage::SlotStatus;
use crate::types::{ParkError, Result, SizeClass, SlotId};

pub use config::{
    default_config_path, ConfigError, EngineOptions, FacilityConfig, FloorConfig, SlotConfig,
};
pub use metrics::{CounterMetrics, FacilityMetrics, MetricsSnapshot, NoopMetrics};
pub use state::{FacilityState, NearestSlot};
pub use stats::{SizeStats, StatsReport};

/// Thread-safe handle to one facility's parking state.
#[derive(Clone)]
pub struct Facility {
    state: Arc<RwLock<FacilityState>>,
    metrics: Arc<dyn FacilityMetrics>,
}

impl Facility {
    pub fn new(state: FacilityState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            metrics: Arc::new(NoopMetrics),
        }
    }

    /// Builds the facility described by `config`.
    pub fn from_config(config: &FacilityConfig) -> Result<Self> {
        Ok(Self::new(FacilityState::from_config(config)?))
    }

    /// Replaces the metrics sink.
    pub fn with_metrics(mut self, metrics: Arc<dyn FacilityMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn list_slots(&self) -> Vec<SlotStatus> {
        self.state.read().list_slots()
    }

    /// Reserves slots for `vehicle`; see [`FacilityState::allocate`].
    pub fn allocate(&self, vehicle: &str, size: &str, kind: &str) -> Result<Vec<SlotId>> {
        let mut state = self.state.write();
        match state.allocate(vehicle, size, kind) {
            Ok(slots) => {
                self.metrics.allocation_committed(slots.len());
                debug!(vehicle, kind, slots = ?slots, "facility.allocate.committed");
                Ok(slots)
            }
            Err(err) => {
                self.metrics.allocation_rejected(err.kind());
                debug!(vehicle, kind, error = %err, "facility.allocate.rejected");
                Err(err)
            }
        }
    }

    pub fn release(&self, vehicle: &str) -> Result<Vec<SlotId>> {
        let mut state = self.state.write();
        match state.release(vehicle) {
            Ok(slots) => {
                self.metrics.release_committed(slots.len());
                debug!(vehicle, slots = ?slots, "facility.release.committed");
                Ok(slots)
            }
            Err(err) => {
                self.metrics.release_rejected();
                debug!(vehicle, error = %err, "facility.release.rejected");
                Err(err)
            }
        }
    }

    /// Hop count between two 1-based slot positions.
    pub fn shortest_hops(&self, src: u32, dest: u32) -> Result<u32> {
        let result = self.state.read().shortest_hops(src, dest);
        self.record_hop_query(&result);
        result
    }

    pub fn shortest_path(&self, src: u32, dest: u32) -> Result<Vec<SlotId>> {
        let result = self.state.read().shortest_path(src, dest);
        self.record_hop_query(&result);
        result
    }

    pub fn nearest_available(&self, from: u32, size: SizeClass) -> Result<Option<NearestSlot>> {
        self.state.read().nearest_available(from, size)
    }

    /// Maximum number of stays that fit back to back in one space.
    pub fn max_schedule(&self, entries: &[u64], exits: &[u64]) -> Result<usize> {
        let intervals = schedule::intervals_from(entries, exits)?;
        self.metrics.schedule_run(intervals.len());
        Ok(schedule::max_non_overlapping(&intervals))
    }

    /// One maximum chain of non-overlapping stays.
    pub fn best_schedule(&self, entries: &[u64], exits: &[u64]) -> Result<Vec<Interval>> {
        let intervals = schedule::intervals_from(entries, exits)?;
        self.metrics.schedule_run(intervals.len());
        Ok(schedule::select_non_overlapping(&intervals))
    }

    /// Active reservations ordered by vehicle id.
    pub fn reservations(&self) -> Vec<Reservation> {
        self.state.read().engine().reservations().cloned().collect()
    }

    pub fn stats(&self) -> StatsReport {
        stats::collect(&self.state.read(), self.metrics.snapshot())
    }

    /// Executes one driver command.
    pub fn execute(&self, command: Command) -> Result<Outcome> {
        let outcome = match command {
            Command::List => Outcome::Slots {
                slots: self.list_slots(),
            },
            Command::Park {
                vehicle,
                size,
                kind,
            } => {
                let slots = self.allocate(&vehicle, &size, &kind)?;
                Outcome::Parked { vehicle, slots }
            }
            Command::Leave { vehicle } => {
                let slots = self.release(&vehicle)?;
                Outcome::Released { vehicle, slots }
            }
            Command::Hops { src, dest } => Outcome::Hops {
                src,
                dest,
                hops: self.shortest_hops(src, dest)?,
            },
            Command::Path { src, dest } => Outcome::Path {
                slots: self.shortest_path(src, dest)?,
            },
            Command::Nearest { from, size } => Outcome::Nearest {
                nearest: self.nearest_available(from, size)?,
            },
            Command::Schedule { entries, exits } => {
                let chain = self.best_schedule(&entries, &exits)?;
                Outcome::Schedule {
                    count: chain.len(),
                    chain,
                }
            }
            Command::Stats => Outcome::Stats {
                report: self.stats(),
            },
            Command::Help => Outcome::Help { text: HELP },
            Command::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }

    fn record_hop_query<T>(&self, result: &Result<T>) {
        match result {
            Ok(_) => self.metrics.hop_query(true),
            Err(ParkError::Unreachable { .. }) => self.metrics.hop_query(false),
            Err(_) => {}
        }
    }
}

impl std::fmt::Debug for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Facility")
            .field("slots", &self.state.read().registry().len())
            .finish_non_exhaustive()
    }
}
