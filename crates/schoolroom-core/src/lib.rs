//! # Schoolroom Core Library
//!
//! Core business logic for Schoolroom, a weekly lesson planner for a small
//! homeschool roster. All operations are available through this library;
//! the CLI binary (and any richer UI) is a thin collaborator over it.
//!
//! ## Architecture
//!
//! - **Store**: single owned source of truth for children, subjects, and
//!   lessons; every mutation flows through it and fans out change
//!   notifications
//! - **Queries**: stateless projections by child, week offset, and day,
//!   including the weekend-folding "today" view
//! - **Reschedule engine**: cascading forward shift of a subject's
//!   incomplete lesson chain
//! - **Progression engine**: XP accrual, power-law leveling, and a
//!   date-guarded daily streak
//! - **Storage**: JSON snapshot persistence behind a queued background
//!   writer, plus TOML configuration for the roster
//!
//! ## Key Components
//!
//! - [`PlannerStore`]: canonical in-memory state and mutation API
//! - [`reschedule_lesson`]: the cascade algorithm
//! - [`award_xp`] / [`update_streak`]: the progression state machine
//! - [`SaveWorker`]: mutation-ordered background persistence

pub mod error;
pub mod events;
pub mod plan;
pub mod progression;
pub mod query;
pub mod reschedule;
pub mod storage;
pub mod store;

pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use events::{ChangeKind, EventBus, Subscription};
pub use plan::{
    Child, ChildFilter, ChildProgress, Lesson, LessonSpec, PlannerView, Snapshot, Subject,
    SubjectSpec,
};
pub use progression::{award_xp, complete_lesson, update_streak, XpAward};
pub use reschedule::reschedule_lesson;
pub use storage::{Config, JsonFileStore, SaveHandle, SaveStatus, SaveWorker, SnapshotStore};
pub use store::PlannerStore;
