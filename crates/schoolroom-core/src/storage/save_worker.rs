//! Queued background snapshot writer.
//!
//! Mutations enqueue full snapshots; a single worker thread drains the
//! queue and writes each snapshot through the configured [`SnapshotStore`].
//! Because the queue is FIFO and there is exactly one writer, a later
//! mutation's save can never be overtaken by an earlier one's.
//!
//! Each save gets a bounded number of attempts. A snapshot that still
//! fails after the last attempt is dropped: the failure is logged and
//! recorded in [`SaveStatus`], and the next queued snapshot (which
//! supersedes it anyway) proceeds.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::plan::Snapshot;
use crate::storage::SnapshotStore;

const MAX_SAVE_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(25);

/// Observable state of the save pipeline.
#[derive(Debug, Clone, Default)]
pub struct SaveStatus {
    /// Snapshots queued but not yet written.
    pub pending: usize,
    /// When the last successful write finished.
    pub last_saved_at: Option<DateTime<Utc>>,
    /// Message from the last terminally failed write, cleared on success.
    pub last_error: Option<String>,
}

enum Job {
    Save(Snapshot),
    Flush(mpsc::Sender<()>),
}

/// Cloneable handle the store uses to queue saves.
#[derive(Clone)]
pub struct SaveHandle {
    tx: mpsc::Sender<Job>,
    status: Arc<Mutex<SaveStatus>>,
}

impl SaveHandle {
    /// Queue a snapshot for writing. Never blocks on the write itself.
    pub fn queue(&self, snapshot: Snapshot) {
        {
            let mut status = self.status.lock().unwrap();
            status.pending += 1;
        }
        // A closed channel means the worker is gone; the snapshot is lost,
        // which callers accept the same way they accept a failed save.
        if self.tx.send(Job::Save(snapshot)).is_err() {
            eprintln!("schoolroom: save worker is down, snapshot dropped");
            let mut status = self.status.lock().unwrap();
            status.pending = status.pending.saturating_sub(1);
            status.last_error = Some("save worker is down".to_string());
        }
    }

    /// Current pipeline status.
    pub fn status(&self) -> SaveStatus {
        self.status.lock().unwrap().clone()
    }
}

/// Owns the worker thread. Dropping it drains the queue and joins.
pub struct SaveWorker {
    tx: Option<mpsc::Sender<Job>>,
    join: Option<JoinHandle<()>>,
    status: Arc<Mutex<SaveStatus>>,
}

impl SaveWorker {
    /// Spawn a worker writing through `store`.
    pub fn spawn(store: Box<dyn SnapshotStore>) -> Self {
        let (tx, rx) = mpsc::channel();
        let status = Arc::new(Mutex::new(SaveStatus::default()));
        let worker_status = Arc::clone(&status);

        let join = std::thread::spawn(move || worker_loop(rx, store, worker_status));

        Self {
            tx: Some(tx),
            join: Some(join),
            status,
        }
    }

    /// Handle for queueing saves; hand this to the store.
    pub fn handle(&self) -> SaveHandle {
        SaveHandle {
            tx: self.tx.as_ref().expect("worker not shut down").clone(),
            status: Arc::clone(&self.status),
        }
    }

    /// Block until every save queued so far has been attempted.
    pub fn flush(&self) {
        let Some(tx) = self.tx.as_ref() else { return };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(Job::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// Current pipeline status.
    pub fn status(&self) -> SaveStatus {
        self.status.lock().unwrap().clone()
    }
}

impl Drop for SaveWorker {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain remaining jobs and exit.
        self.tx.take();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

fn worker_loop(rx: mpsc::Receiver<Job>, store: Box<dyn SnapshotStore>, status: Arc<Mutex<SaveStatus>>) {
    while let Ok(job) = rx.recv() {
        match job {
            Job::Save(snapshot) => {
                let outcome = save_with_retry(store.as_ref(), &snapshot);
                let mut status = status.lock().unwrap();
                status.pending = status.pending.saturating_sub(1);
                match outcome {
                    Ok(()) => {
                        status.last_saved_at = Some(Utc::now());
                        status.last_error = None;
                    }
                    Err(message) => {
                        eprintln!("schoolroom: snapshot save failed after {MAX_SAVE_ATTEMPTS} attempts: {message}");
                        status.last_error = Some(message);
                    }
                }
            }
            Job::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

fn save_with_retry(store: &dyn SnapshotStore, snapshot: &Snapshot) -> Result<(), String> {
    let mut last_error = String::new();
    for attempt in 1..=MAX_SAVE_ATTEMPTS {
        match store.save(snapshot) {
            Ok(()) => return Ok(()),
            Err(e) => {
                last_error = e.to_string();
                if attempt < MAX_SAVE_ATTEMPTS {
                    std::thread::sleep(RETRY_BASE_DELAY * attempt);
                }
            }
        }
    }
    Err(last_error)
}
