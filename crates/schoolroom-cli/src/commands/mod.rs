//! CLI command implementations.
//!
//! Every command opens the planner the same way: load the config for the
//! roster, load the last snapshot from disk, and wire the store to a save
//! worker. Commands that mutate call [`Planner::finish`] so queued saves
//! land before the process exits.

pub mod config;
pub mod lesson;
pub mod profile;
pub mod schedule;
pub mod subject;

use schoolroom_core::storage::Config;
use schoolroom_core::{ChildFilter, JsonFileStore, PlannerStore, SaveWorker, SnapshotStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// A fully wired planner session for one CLI invocation.
pub struct Planner {
    pub store: PlannerStore,
    pub config: Config,
    worker: SaveWorker,
}

impl Planner {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let file_store = JsonFileStore::open()?;
        let snapshot = file_store.load()?;

        let worker = SaveWorker::spawn(Box::new(file_store));
        let mut store = PlannerStore::new(config.roster());
        if let Some(snapshot) = snapshot {
            store.load_snapshot(snapshot);
        }
        store.set_save_handle(worker.handle());

        Ok(Self {
            store,
            config,
            worker,
        })
    }

    /// Wait for queued saves, surfacing a terminal save failure on stderr.
    pub fn finish(self) {
        self.worker.flush();
        if let Some(error) = self.worker.status().last_error {
            eprintln!("warning: planner snapshot was not saved: {error}");
        }
    }
}

/// Resolve a child by id or (case-insensitive) name.
pub fn resolve_child(store: &PlannerStore, key: &str) -> Result<String, String> {
    store
        .children()
        .iter()
        .find(|c| c.id == key || c.name.eq_ignore_ascii_case(key))
        .map(|c| c.id.clone())
        .ok_or_else(|| format!("no child matching '{key}'"))
}

/// Turn an optional `--child` flag into a view filter.
pub fn child_filter(store: &PlannerStore, child: Option<&str>) -> Result<ChildFilter, String> {
    match child {
        None => Ok(ChildFilter::All),
        Some(key) => Ok(ChildFilter::Only(resolve_child(store, key)?)),
    }
}

/// Resolve a subject by id, or by name scoped to a child.
pub fn resolve_subject(
    store: &PlannerStore,
    key: &str,
    child_id: Option<&str>,
) -> Result<String, String> {
    if let Some(subject) = store.subject(key) {
        return Ok(subject.id.clone());
    }

    let matches: Vec<_> = store
        .subjects()
        .iter()
        .filter(|s| s.name.eq_ignore_ascii_case(key))
        .filter(|s| child_id.map(|c| s.child_id == c).unwrap_or(true))
        .collect();

    match matches.as_slice() {
        [] => Err(format!("no subject matching '{key}'")),
        [subject] => Ok(subject.id.clone()),
        _ => Err(format!(
            "subject '{key}' is ambiguous, pass --child or the subject id"
        )),
    }
}
