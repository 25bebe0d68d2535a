use super::wage_table::{RegionWageTable, WageTableError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File-backed persistence for the user-edited minimum-wage table.
#[derive(Debug, Clone)]
pub struct WageTableStore {
    path: PathBuf,
}

impl WageTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Effective table for a run. A missing file means defaults; an unreadable or malformed
    /// override also yields defaults and is only logged.
    pub fn load(&self) -> RegionWageTable {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no wage table override, using defaults");
            return RegionWageTable::default();
        }

        match self.read_override() {
            Some(table) => {
                debug!(path = %self.path.display(), "loaded wage table override");
                table
            }
            None => {
                warn!(
                    path = %self.path.display(),
                    "wage table override is corrupt, falling back to defaults"
                );
                RegionWageTable::default()
            }
        }
    }

    fn read_override(&self) -> Option<RegionWageTable> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let document: Value = serde_json::from_str(&raw).ok()?;
        RegionWageTable::merged_with_override(&document)
    }

    /// Persists the full table for future runs.
    pub fn save(&self, table: &RegionWageTable) -> Result<&Path, WageTableError> {
        let encoded = serde_json::to_string_pretty(&table.to_document())?;

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        fs::write(&self.path, encoded).map_err(|source| self.io_error(source))?;

        Ok(&self.path)
    }

    fn io_error(&self, source: std::io::Error) -> WageTableError {
        WageTableError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
