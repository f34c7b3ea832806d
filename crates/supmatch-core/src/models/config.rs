//! Configuration structures for supplier search and index building.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SupmatchError};
use crate::matcher::MatcherKind;
use crate::search::SearchMode;

/// Main configuration for supmatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupmatchConfig {
    /// Search configuration.
    pub search: SearchConfig,

    /// Catalog index configuration.
    pub index: IndexConfig,
}

/// Search orchestration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of concurrent workers in exhaustive mode.
    pub workers: usize,

    /// Operating mode.
    pub mode: SearchMode,

    /// Capacity of the buffer between the catalog reader and the workers.
    pub channel_capacity: usize,

    /// Matcher used by exhaustive mode.
    pub matcher: MatcherKind,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            mode: SearchMode::Exhaustive,
            channel_capacity: 100,
            matcher: MatcherKind::Positional,
        }
    }
}

/// Catalog index artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Extension appended to the catalog path for the flattened catalog.
    pub flattened_extension: String,

    /// Extension appended to the catalog path for the offset map.
    pub offsets_extension: String,

    /// Read every line of a leading-word group on an index hit, not just the first.
    pub read_full_group: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            flattened_extension: "indexed".to_string(),
            offsets_extension: "idx".to_string(),
            read_full_group: true,
        }
    }
}

impl IndexConfig {
    /// Path of the flattened catalog for `catalog`.
    pub fn flattened_path(&self, catalog: &Path) -> PathBuf {
        with_extra_extension(catalog, &self.flattened_extension)
    }

    /// Path of the offset map for `catalog`.
    pub fn offsets_path(&self, catalog: &Path) -> PathBuf {
        with_extra_extension(catalog, &self.offsets_extension)
    }
}

/// `suppliers.txt` + `idx` -> `suppliers.txt.idx`
fn with_extra_extension(path: &Path, extension: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".");
    os.push(extension);
    PathBuf::from(os)
}

impl SupmatchConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> std::result::Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Reject settings that cannot drive a search.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        if self.index.flattened_extension == self.index.offsets_extension {
            return Err(SupmatchError::Config(
                "flattened and offset map extensions must differ".to_string(),
            ));
        }
        Ok(())
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(SupmatchError::Config("worker count must be at least 1".to_string()));
        }
        if self.channel_capacity == 0 {
            return Err(SupmatchError::Config(
                "channel capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
