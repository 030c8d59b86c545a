use std::fmt;

use serde::Serialize;

use crate::types::{ParkError, Result};

/// Half-open stay `[entry, exit)` of one vehicle.
///
/// # Invariants
/// `entry < exit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    entry: u64,
    exit: u64,
}

impl Interval {
    pub fn new(entry: u64, exit: u64) -> Result<Self> {
        if exit <= entry {
            return Err(ParkError::InvalidInterval { entry, exit });
        }
        Ok(Self { entry, exit })
    }

    #[inline]
    pub fn entry(&self) -> u64 {
        self.entry
    }

    #[inline]
    pub fn exit(&self) -> u64 {
        self.exit
    }

    /// Whether `self` ends no later than `next` starts. Touching is allowed.
    #[inline]
    pub fn precedes(&self, next: &Interval) -> bool {
        self.exit <= next.entry
    }

    /// Whether the two stays share any instant.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        !self.precedes(other) && !other.precedes(self)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.entry, self.exit)
    }
}

/// Pairs up parallel entry/exit lists.
pub fn intervals_from(entries: &[u64], exits: &[u64]) -> Result<Vec<Interval>> {
    if entries.len() != exits.len() {
        return Err(ParkError::ScheduleLengthMismatch {
            entries: entries.len(),
            exits: exits.len(),
        });
    }
    entries
        .iter()
        .zip(exits)
        .map(|(&entry, &exit)| Interval::new(entry, exit))
        .collect()
}
