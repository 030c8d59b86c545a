use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::floor::FloorGraph;
use crate::storage::SlotRegistry;
use crate::types::{ParkError, SizeClass, SlotId};

/// Static description of a facility: its slots, floor plan and engine knobs.
///
/// ```toml
/// [engine]
/// bus_slots = 3
///
/// [[slots]]
/// id = 1
/// size = "small"
///
/// [floor]
/// linear = true
/// edges = [[2, 5]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityConfig {
    #[serde(default)]
    pub engine: EngineOptions,
    pub slots: Vec<SlotConfig>,
    #[serde(default)]
    pub floor: FloorConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub id: u32,
    pub size: SizeClass,
}

/// Walkable connections between slots, addressed by 1-based position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorConfig {
    /// Connect every slot to the next one in the master ordering.
    #[serde(default)]
    pub linear: bool,
    /// Extra undirected edges as `[a, b]` position pairs.
    #[serde(default)]
    pub edges: Vec<[usize; 2]>,
}

/// Tunables for the allocation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Contiguous slots a bus occupies.
    pub bus_slots: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { bus_slots: 3 }
    }
}

impl FacilityConfig {
    /// Six slots `[small, medium, large, medium, small, large]`, chained
    /// 1-2-3-4-5-6 with a cross aisle between 2 and 5.
    pub fn demo() -> Self {
        let sizes = [
            SizeClass::Small,
            SizeClass::Medium,
            SizeClass::Large,
            SizeClass::Medium,
            SizeClass::Small,
            SizeClass::Large,
        ];
        Self {
            engine: EngineOptions::default(),
            slots: sizes
                .into_iter()
                .zip(1u32..)
                .map(|(size, id)| SlotConfig { id, size })
                .collect(),
            floor: FloorConfig {
                linear: true,
                edges: vec![[2, 5]],
            },
        }
    }

    /// Reads and parses a TOML layout file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(ConfigError::Syntax)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|source| ConfigError::Serialize { source })
    }

    /// Writes the layout as TOML, creating parent directories as needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<PathBuf, ConfigError> {
        let target = path.as_ref().to_path_buf();
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let serialized = self.to_toml_string()?;
        fs::write(&target, serialized).map_err(|source| ConfigError::Write {
            path: target.clone(),
            source,
        })?;
        Ok(target)
    }

    pub(crate) fn build_registry(&self) -> Result<SlotRegistry, ParkError> {
        SlotRegistry::create(self.slots.iter().map(|slot| (SlotId(slot.id), slot.size)))
    }

    pub(crate) fn build_floor(&self) -> Result<FloorGraph, ParkError> {
        let len = self.slots.len();
        let mut edges = Vec::with_capacity(len + self.floor.edges.len());
        if self.floor.linear {
            edges.extend((1..len).map(|pos| (pos - 1, pos)));
        }
        for &[a, b] in &self.floor.edges {
            match (a.checked_sub(1), b.checked_sub(1)) {
                (Some(a0), Some(b0)) => edges.push((a0, b0)),
                _ => return Err(ParkError::InvalidEdge { a, b, len }),
            }
        }
        FloorGraph::new(len, edges)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read facility config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse facility config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to parse facility config: {0}")]
    Syntax(#[source] toml::de::Error),
    #[error("failed to serialize facility config: {source}")]
    Serialize { source: toml::ser::Error },
    #[error("failed to write facility config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no config directory found; pass --config or set PARKADE_CONFIG")]
    NoConfigPath,
}

/// `<config dir>/parkade/facility.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("parkade").join("facility.toml"))
}
