//! Shared identifiers, size classes and the crate-wide error type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Immutable identifier of a parking slot. Always positive.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u32);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlotId {
    fn from(value: u32) -> Self {
        SlotId(value)
    }
}

impl From<SlotId> for u32 {
    fn from(value: SlotId) -> Self {
        value.0
    }
}

/// Caller-supplied vehicle identifier (licence plate, ticket number, ...).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    /// Builds a vehicle identifier, rejecting empty or all-whitespace input.
    ///
    /// The identifier is opaque: it is stored byte for byte, so `" V1"` and
    /// `"V1"` name different vehicles.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ParkError::InvalidArgument("vehicle id must not be empty"));
        }
        Ok(VehicleId(raw))
    }

    /// Lookup key for a caller string that was never validated. Only used to
    /// report `NotParked` for input that cannot hold a reservation.
    pub(crate) fn unvalidated(raw: &str) -> Self {
        VehicleId(raw.to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VehicleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Physical size class of a slot.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Every size class, smallest first.
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    pub const fn as_str(self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }

    pub(crate) const fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeClass {
    type Err = ParkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(SizeClass::Small),
            "medium" => Ok(SizeClass::Medium),
            "large" => Ok(SizeClass::Large),
            _ => Err(ParkError::InvalidType(s.trim().to_string())),
        }
    }
}

/// Kind of vehicle requesting a reservation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Small,
    Medium,
    Large,
    /// Needs a run of contiguous slots regardless of declared size.
    Bus,
}

impl VehicleKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleKind::Small => "small",
            VehicleKind::Medium => "medium",
            VehicleKind::Large => "large",
            VehicleKind::Bus => "bus",
        }
    }

    /// Size class a single-slot kind parks in; `None` for buses.
    pub const fn size_class(self) -> Option<SizeClass> {
        match self {
            VehicleKind::Small => Some(SizeClass::Small),
            VehicleKind::Medium => Some(SizeClass::Medium),
            VehicleKind::Large => Some(SizeClass::Large),
            VehicleKind::Bus => None,
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleKind {
    type Err = ParkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(VehicleKind::Small),
            "medium" => Ok(VehicleKind::Medium),
            "large" => Ok(VehicleKind::Large),
            "bus" => Ok(VehicleKind::Bus),
            _ => Err(ParkError::InvalidType(s.trim().to_string())),
        }
    }
}

/// Errors surfaced by the parking core.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParkError {
    #[error("vehicle {0} already holds a reservation")]
    AlreadyParked(VehicleId),
    #[error("vehicle {0} is not parked")]
    NotParked(VehicleId),
    #[error("no capacity for the requested reservation")]
    NoCapacity,
    #[error("invalid vehicle type or size: {0:?}")]
    InvalidType(String),
    #[error("slot {slot} is out of range (facility has {len} slots)")]
    OutOfRange { slot: u32, len: usize },
    #[error("slot {dest} is unreachable from slot {src}")]
    Unreachable { src: u32, dest: u32 },
    #[error("slot {0} not found")]
    NotFound(SlotId),
    #[error("slot {0} is already occupied")]
    AlreadyOccupied(SlotId),
    #[error("slot {0} is not occupied")]
    NotOccupied(SlotId),
    #[error("duplicate slot id {0}")]
    DuplicateSlot(SlotId),
    #[error("invalid layout: {0}")]
    InvalidLayout(&'static str),
    #[error("edge ({a}, {b}) references a position outside 1..={len}")]
    InvalidEdge { a: usize, b: usize, len: usize },
    #[error("interval [{entry}, {exit}) must have exit > entry")]
    InvalidInterval { entry: u64, exit: u64 },
    #[error("schedule has {entries} entry times but {exits} exit times")]
    ScheduleLengthMismatch { entries: usize, exits: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

impl ParkError {
    /// Stable snake_case label, used for metrics and structured output.
    pub const fn kind(&self) -> &'static str {
        match self {
            ParkError::AlreadyParked(_) => "already_parked",
            ParkError::NotParked(_) => "not_parked",
            ParkError::NoCapacity => "no_capacity",
            ParkError::InvalidType(_) => "invalid_type",
            ParkError::OutOfRange { .. } => "out_of_range",
            ParkError::Unreachable { .. } => "unreachable",
            ParkError::NotFound(_) => "not_found",
            ParkError::AlreadyOccupied(_) => "already_occupied",
            ParkError::NotOccupied(_) => "not_occupied",
            ParkError::DuplicateSlot(_) => "duplicate_slot",
            ParkError::InvalidLayout(_) => "invalid_layout",
            ParkError::InvalidEdge { .. } => "invalid_edge",
            ParkError::InvalidInterval { .. } => "invalid_interval",
            ParkError::ScheduleLengthMismatch { .. } => "schedule_length_mismatch",
            ParkError::InvalidArgument(_) => "invalid_argument",
            ParkError::InvalidCommand(_) => "invalid_command",
        }
    }
}

pub type Result<T> = std::result::Result<T, ParkError>;
