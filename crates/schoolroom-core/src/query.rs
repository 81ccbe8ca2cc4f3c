//! Read-side schedule projections.
//!
//! Stateless filters over the store, split by the three axes the UI
//! navigates: active child, active week offset, and day. Nothing here
//! mutates; collaborators re-run these after a change notification.
//!
//! The "today" view has its own rule: on Saturday or Sunday it shows
//! Monday's lessons, and it is always pinned to the current week
//! (`week_offset == 0`) no matter where week navigation points. Today is
//! informational, not navigable.

use chrono::{Datelike, Local, NaiveDate, Timelike};

use crate::plan::{Lesson, LAST_SCHOOL_DAY};
use crate::store::PlannerStore;

/// Hour after which a same-day incomplete lesson counts as missed.
const END_OF_SCHOOL_DAY_HOUR: u32 = 15;

impl PlannerStore {
    /// Lessons in the active week, restricted to the active child filter.
    pub fn lessons_for_active_view(&self) -> Vec<&Lesson> {
        self.lessons
            .iter()
            .filter(|l| l.week_offset == self.current_week_offset)
            .filter(|l| self.current_child.matches(&l.child_id))
            .collect()
    }

    /// Active-view lessons on one school day (1-5).
    pub fn lessons_for_day(&self, day: u8) -> Vec<&Lesson> {
        self.lessons_for_active_view()
            .into_iter()
            .filter(|l| l.day_of_week == day)
            .collect()
    }

    /// Today's lessons, folding weekends onto Monday.
    pub fn todays_lessons(&self) -> Vec<&Lesson> {
        self.todays_lessons_on(Local::now().date_naive())
    }

    /// [`Self::todays_lessons`] for an explicit calendar date.
    pub fn todays_lessons_on(&self, date: NaiveDate) -> Vec<&Lesson> {
        let weekday = date.weekday().number_from_monday() as u8; // 1=Mon..7=Sun
        let target_day = if weekday > LAST_SCHOOL_DAY { 1 } else { weekday };

        self.lessons
            .iter()
            .filter(|l| l.week_offset == 0)
            .filter(|l| l.day_of_week == target_day)
            .filter(|l| self.current_child.matches(&l.child_id))
            .collect()
    }

    /// Percentage (0-100) of a child's lessons completed in the active
    /// week. A child with no lessons scores 0.
    pub fn progress_for_child(&self, child_id: &str) -> u8 {
        let (total, completed) = self
            .lessons
            .iter()
            .filter(|l| l.child_id == child_id && l.week_offset == self.current_week_offset)
            .fold((0u32, 0u32), |(total, done), l| {
                (total + 1, done + u32::from(l.completed))
            });

        if total == 0 {
            return 0;
        }
        ((completed as f64 / total as f64) * 100.0).round() as u8
    }

    /// Whether a lesson looks missed from where the view stands, i.e. the
    /// UI should offer the reschedule action.
    ///
    /// Past weeks: always, for incomplete lessons. Future weeks: never.
    /// Current week: the lesson's day has passed, or it is the same day
    /// past the end of the school afternoon.
    pub fn reschedule_suggested(&self, lesson: &Lesson) -> bool {
        let now = Local::now();
        self.reschedule_suggested_at(lesson, now.date_naive(), now.hour())
    }

    /// [`Self::reschedule_suggested`] for an explicit date and hour.
    pub fn reschedule_suggested_at(&self, lesson: &Lesson, date: NaiveDate, hour: u32) -> bool {
        if lesson.completed {
            return false;
        }
        if self.current_week_offset < 0 {
            return true;
        }
        if self.current_week_offset > 0 {
            return false;
        }

        // Sunday counts as 0 here so Monday lessons are not flagged
        // before the week starts.
        let current_day = date.weekday().num_days_from_sunday() as u8;
        if lesson.day_of_week < current_day {
            return true;
        }
        lesson.day_of_week == current_day && hour >= END_OF_SCHOOL_DAY_HOUR
    }
}
