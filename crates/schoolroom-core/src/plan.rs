//! Data model for the weekly lesson planner.
//!
//! Three entity kinds live in the store: children (the people being taught),
//! subjects (user-defined categories owned by one child), and lessons
//! (recurring weekly activities slotted on a Monday-Friday grid).
//!
//! Lessons are addressed by `(day_of_week, week_offset)`: day 1-5 maps to
//! Monday-Friday, and the week offset is the signed distance in weeks from
//! the current calendar week. Weekend days are never valid lesson slots.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// First and last valid school days (Monday and Friday).
pub const FIRST_SCHOOL_DAY: u8 = 1;
pub const LAST_SCHOOL_DAY: u8 = 5;

/// A child on the roster.
///
/// Progression fields (`level`, `xp`, `xp_to_next_level`, `streak`) are
/// mutated only by the progression engine; after any progression update
/// `xp < xp_to_next_level` holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub grade: u8,
    /// Display emoji/icon, opaque to the core.
    pub avatar: String,
    /// Free-form learning track label, opaque to the core.
    pub track: String,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub streak: u32,
    /// Calendar date of the last streak increment.
    pub streak_last_updated: Option<NaiveDate>,
}

impl Child {
    /// Create a level-1 child with no XP or streak.
    pub fn new(id: impl Into<String>, name: impl Into<String>, grade: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            grade,
            avatar: String::new(),
            track: String::new(),
            level: 1,
            xp: 0,
            xp_to_next_level: crate::progression::BASE_XP_TO_LEVEL,
            streak: 0,
            streak_last_updated: None,
        }
    }
}

/// A subject: a user-defined category of lessons owned by exactly one child.
///
/// There is no "shared" subject at rest. A subject meant for every child is
/// resolved into one `Subject` per roster child at creation time
/// (`PlannerStore::add_subject_shared`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    /// Display color token, opaque to the core.
    pub color: String,
    pub child_id: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new subject.
#[derive(Debug, Clone)]
pub struct SubjectSpec {
    pub name: String,
    pub color: String,
    pub child_id: String,
}

/// A lesson slotted on the weekly grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub subject_id: String,
    /// Denormalized owning child, always equal to the subject's owner.
    pub child_id: String,
    pub title: String,
    /// 1-5 = Monday-Friday.
    pub day_of_week: u8,
    /// Signed distance in weeks from the current calendar week.
    pub week_offset: i32,
    pub completed: bool,
    /// Non-null exactly when `completed` is true.
    pub completed_at: Option<DateTime<Utc>>,
    /// The slot the lesson was created on. Set once, never mutated.
    pub original_day: u8,
    /// Sticky flag: set by the reschedule engine, never cleared.
    pub rescheduled: bool,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new lesson.
#[derive(Debug, Clone)]
pub struct LessonSpec {
    pub subject_id: String,
    pub child_id: String,
    pub title: String,
    pub day_of_week: u8,
    /// Defaults to 0 (the current week) when unset.
    pub week_offset: Option<i32>,
}

/// Which children the active view covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChildFilter {
    /// Family view: every child.
    #[default]
    All,
    /// A single child's view.
    Only(String),
}

impl ChildFilter {
    /// Whether a lesson or subject owned by `child_id` is visible.
    pub fn matches(&self, child_id: &str) -> bool {
        match self {
            ChildFilter::All => true,
            ChildFilter::Only(id) => id == child_id,
        }
    }
}

/// Which screen the UI collaborator is presenting.
///
/// The store tracks this only so view switches flow through the same
/// notification fan-out as data changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlannerView {
    #[default]
    Today,
    Week,
    Subjects,
    Progress,
}

/// Per-child progression fields captured in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildProgress {
    pub child_id: String,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub streak: u32,
    pub streak_last_updated: Option<NaiveDate>,
}

impl ChildProgress {
    pub fn of(child: &Child) -> Self {
        Self {
            child_id: child.id.clone(),
            level: child.level,
            xp: child.xp,
            xp_to_next_level: child.xp_to_next_level,
            streak: child.streak,
            streak_last_updated: child.streak_last_updated,
        }
    }
}

/// The full serializable planner state handed to the persistence layer.
///
/// The children roster itself is configuration, not state; only their
/// progression travels with the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub progress: Vec<ChildProgress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_filter_matches() {
        assert!(ChildFilter::All.matches("1"));
        assert!(ChildFilter::Only("1".to_string()).matches("1"));
        assert!(!ChildFilter::Only("1".to_string()).matches("2"));
    }

    #[test]
    fn snapshot_serialization() {
        let snapshot = Snapshot {
            subjects: vec![Subject {
                id: "s-1".to_string(),
                name: "Math".to_string(),
                color: "#E07A5F".to_string(),
                child_id: "1".to_string(),
                created_at: Utc::now(),
            }],
            lessons: vec![Lesson {
                id: "l-1".to_string(),
                subject_id: "s-1".to_string(),
                child_id: "1".to_string(),
                title: "Fractions".to_string(),
                day_of_week: 2,
                week_offset: 0,
                completed: false,
                completed_at: None,
                original_day: 2,
                rescheduled: false,
                created_at: Utc::now(),
            }],
            progress: vec![],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.subjects.len(), 1);
        assert_eq!(decoded.lessons[0].day_of_week, 2);
    }

    #[test]
    fn snapshot_tolerates_missing_sections() {
        // Old snapshots carry only subjects and lessons.
        let decoded: Snapshot = serde_json::from_str(r#"{"subjects":[],"lessons":[]}"#).unwrap();
        assert!(decoded.progress.is_empty());
    }
}
