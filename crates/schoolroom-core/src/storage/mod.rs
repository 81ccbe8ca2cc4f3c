//! Persistence collaborators for the planner core.
//!
//! The store itself never touches disk. Mutations hand full [`Snapshot`]s
//! to a [`SaveWorker`], which writes them through a [`SnapshotStore`] in
//! mutation order on a background thread. Save failures are retried a
//! bounded number of times, then logged and recorded in [`SaveStatus`];
//! they never propagate back into the core.

mod config;
pub mod json_store;
pub mod save_worker;

pub use config::{ChildConfig, Config, GamificationConfig};
pub use json_store::JsonFileStore;
pub use save_worker::{SaveHandle, SaveStatus, SaveWorker};

use std::path::PathBuf;

use crate::error::StorageError;
use crate::plan::Snapshot;

/// Durable storage for planner snapshots.
///
/// `load` returns `Ok(None)` when nothing has been saved yet; callers fall
/// back to an empty planner.
pub trait SnapshotStore: Send {
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;
    fn load(&self) -> Result<Option<Snapshot>, StorageError>;
}

/// Returns `~/.config/schoolroom[-dev]/` based on SCHOOLROOM_ENV.
///
/// Set SCHOOLROOM_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SCHOOLROOM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("schoolroom-dev")
    } else {
        base_dir.join("schoolroom")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
