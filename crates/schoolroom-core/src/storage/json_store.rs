//! JSON file-backed snapshot storage.
//!
//! The whole planner state is small (two children, a handful of subjects,
//! a week grid of lessons), so every save rewrites one pretty-printed JSON
//! file under the data directory.

use std::path::PathBuf;

use crate::error::StorageError;
use crate::plan::Snapshot;
use crate::storage::{data_dir, SnapshotStore};

const SNAPSHOT_FILE: &str = "planner.json";

/// Snapshot store writing `planner.json` in the data directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at the default location.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self {
            path: data_dir()?.join(SNAPSHOT_FILE),
        })
    }

    /// Open the store at a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(snapshot).map_err(StorageError::Encode)?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::FileAccess {
            path: self.path.clone(),
            source,
        })
    }

    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|source| StorageError::FileAccess {
                path: self.path.clone(),
                source,
            })?;

        let snapshot = serde_json::from_str(&content).map_err(|source| StorageError::Decode {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(snapshot))
    }
}
