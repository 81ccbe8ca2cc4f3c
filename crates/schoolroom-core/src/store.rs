//! The planner store: single source of truth for all planner state.
//!
//! Every read elsewhere in the system is a projection of this state and
//! every write flows through the methods here. Mutations notify
//! subscribers through the [`EventBus`] and queue a full-snapshot save
//! through the persistence handle; the mutation path never blocks on or
//! observes the save outcome.
//!
//! Error policy (deliberate): mutations referencing an unknown id are
//! silent no-ops with no notification and no save. Only `add_lesson`
//! validates its input, because it is the one operation that can create a
//! dangling reference or an off-grid slot.

use chrono::Utc;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::events::{ChangeKind, EventBus, Subscription};
use crate::plan::{
    Child, ChildFilter, ChildProgress, Lesson, LessonSpec, PlannerView, Snapshot, Subject,
    SubjectSpec, FIRST_SCHOOL_DAY, LAST_SCHOOL_DAY,
};
use crate::storage::SaveHandle;

/// Canonical in-memory planner state.
///
/// Owned explicitly by the embedding application and passed by reference
/// to collaborators; there is no global instance.
pub struct PlannerStore {
    pub(crate) children: Vec<Child>,
    pub(crate) subjects: Vec<Subject>,
    pub(crate) lessons: Vec<Lesson>,
    pub(crate) current_view: PlannerView,
    pub(crate) current_child: ChildFilter,
    pub(crate) current_week_offset: i32,
    bus: EventBus,
    save: Option<SaveHandle>,
}

impl PlannerStore {
    /// Create an empty store over a children roster.
    pub fn new(children: Vec<Child>) -> Self {
        Self {
            children,
            subjects: Vec::new(),
            lessons: Vec::new(),
            current_view: PlannerView::default(),
            current_child: ChildFilter::default(),
            current_week_offset: 0,
            bus: EventBus::new(),
            save: None,
        }
    }

    /// Attach the persistence handle; subsequent mutations queue saves.
    pub fn set_save_handle(&mut self, handle: SaveHandle) {
        self.save = Some(handle);
    }

    // ------------------------------------------------------------------
    // Subscription / notification
    // ------------------------------------------------------------------

    /// Register a change listener; see [`EventBus`] for the delivery
    /// contract (FIFO order, per-listener fault isolation).
    pub fn subscribe(&self, listener: impl Fn(ChangeKind) + 'static) -> Subscription {
        self.bus.subscribe(listener)
    }

    /// Deliver a change kind to every listener, synchronously.
    pub fn notify(&self, kind: ChangeKind) {
        self.bus.emit(kind);
    }

    pub(crate) fn queue_save(&self) {
        if let Some(handle) = &self.save {
            handle.queue(self.snapshot());
        }
    }

    // ------------------------------------------------------------------
    // View state
    // ------------------------------------------------------------------

    pub fn current_view(&self) -> PlannerView {
        self.current_view
    }

    pub fn current_child(&self) -> &ChildFilter {
        &self.current_child
    }

    pub fn current_week_offset(&self) -> i32 {
        self.current_week_offset
    }

    pub fn set_view(&mut self, view: PlannerView) {
        self.current_view = view;
        self.notify(ChangeKind::View);
    }

    pub fn set_child(&mut self, filter: ChildFilter) {
        self.current_child = filter;
        self.notify(ChangeKind::Child);
    }

    pub fn set_week_offset(&mut self, offset: i32) {
        self.current_week_offset = offset;
        self.notify(ChangeKind::Week);
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn child(&self, child_id: &str) -> Option<&Child> {
        self.children.iter().find(|c| c.id == child_id)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == subject_id)
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }

    /// Subjects visible under a child filter.
    pub fn subjects_for_child(&self, filter: &ChildFilter) -> Vec<&Subject> {
        self.subjects
            .iter()
            .filter(|s| filter.matches(&s.child_id))
            .collect()
    }

    // ------------------------------------------------------------------
    // Subject mutations
    // ------------------------------------------------------------------

    /// Add a subject for one child.
    pub fn add_subject(&mut self, spec: SubjectSpec) -> Subject {
        let subject = Subject {
            id: Uuid::new_v4().to_string(),
            name: spec.name,
            color: spec.color,
            child_id: spec.child_id,
            created_at: Utc::now(),
        };
        self.subjects.push(subject.clone());
        self.notify(ChangeKind::Subjects);
        self.queue_save();
        subject
    }

    /// Add a subject for every child on the roster.
    ///
    /// The "applies to all children" sentinel is resolved here, at creation
    /// time: one independent subject per child, never a shared record.
    pub fn add_subject_shared(&mut self, name: &str, color: &str) -> Vec<Subject> {
        let child_ids: Vec<String> = self.children.iter().map(|c| c.id.clone()).collect();
        child_ids
            .into_iter()
            .map(|child_id| {
                self.add_subject(SubjectSpec {
                    name: name.to_string(),
                    color: color.to_string(),
                    child_id,
                })
            })
            .collect()
    }

    /// Delete a subject and, atomically, every lesson referencing it.
    /// Unknown ids are a silent no-op.
    pub fn remove_subject(&mut self, subject_id: &str) {
        if !self.subjects.iter().any(|s| s.id == subject_id) {
            return;
        }
        self.subjects.retain(|s| s.id != subject_id);
        self.lessons.retain(|l| l.subject_id != subject_id);
        self.notify(ChangeKind::Subjects);
        self.notify(ChangeKind::Lessons);
        self.queue_save();
    }

    // ------------------------------------------------------------------
    // Lesson mutations
    // ------------------------------------------------------------------

    /// Add a lesson on the weekly grid.
    ///
    /// Rejects slots outside Monday-Friday, references to unknown subjects,
    /// and a `child_id` that is not the subject's owner.
    pub fn add_lesson(&mut self, spec: LessonSpec) -> Result<Lesson, ValidationError> {
        if !(FIRST_SCHOOL_DAY..=LAST_SCHOOL_DAY).contains(&spec.day_of_week) {
            return Err(ValidationError::InvalidScheduleSlot {
                day: spec.day_of_week,
            });
        }
        let subject = self
            .subjects
            .iter()
            .find(|s| s.id == spec.subject_id)
            .ok_or_else(|| ValidationError::UnknownSubject(spec.subject_id.clone()))?;
        if subject.child_id != spec.child_id {
            return Err(ValidationError::ChildMismatch {
                subject_id: subject.id.clone(),
                subject_child: subject.child_id.clone(),
                lesson_child: spec.child_id.clone(),
            });
        }

        let lesson = Lesson {
            id: Uuid::new_v4().to_string(),
            subject_id: spec.subject_id,
            child_id: spec.child_id,
            title: spec.title,
            day_of_week: spec.day_of_week,
            week_offset: spec.week_offset.unwrap_or(0),
            completed: false,
            completed_at: None,
            original_day: spec.day_of_week,
            rescheduled: false,
            created_at: Utc::now(),
        };
        self.lessons.push(lesson.clone());
        self.notify(ChangeKind::Lessons);
        self.queue_save();
        Ok(lesson)
    }

    /// Flip a lesson's completion state, stamping or clearing
    /// `completed_at`. Unknown ids are a silent no-op.
    pub fn toggle_lesson(&mut self, lesson_id: &str) {
        let Some(lesson) = self.lessons.iter_mut().find(|l| l.id == lesson_id) else {
            return;
        };
        lesson.completed = !lesson.completed;
        lesson.completed_at = if lesson.completed {
            Some(Utc::now())
        } else {
            None
        };
        self.notify(ChangeKind::Lessons);
        self.queue_save();
    }

    /// Delete a lesson. Unknown ids are a silent no-op.
    pub fn remove_lesson(&mut self, lesson_id: &str) {
        if !self.lessons.iter().any(|l| l.id == lesson_id) {
            return;
        }
        self.lessons.retain(|l| l.id != lesson_id);
        self.notify(ChangeKind::Lessons);
        self.queue_save();
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Serializable copy of the persisted state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            subjects: self.subjects.clone(),
            lessons: self.lessons.clone(),
            progress: self.children.iter().map(ChildProgress::of).collect(),
        }
    }

    /// Replace subjects and lessons from a loaded snapshot and restore
    /// per-child progression onto the roster (matched by child id;
    /// progression for unknown children is ignored).
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        self.subjects = snapshot.subjects;
        self.lessons = snapshot.lessons;
        for progress in snapshot.progress {
            if let Some(child) = self.children.iter_mut().find(|c| c.id == progress.child_id) {
                child.level = progress.level;
                child.xp = progress.xp;
                child.xp_to_next_level = progress.xp_to_next_level;
                child.streak = progress.streak;
                child.streak_last_updated = progress.streak_last_updated;
            }
        }
        self.notify(ChangeKind::Subjects);
        self.notify(ChangeKind::Lessons);
    }
}
