//! XP, leveling, and daily-streak progression.
//!
//! Per-child state machine over `(level, xp, xp_to_next_level, streak)`.
//! XP only ever increases the level; thresholds follow a power law
//! (`floor(100 * level^1.5)`); the streak is a date-guarded counter that
//! moves at most once per calendar day.
//!
//! Level-up resolution loops: one award large enough to cross several
//! thresholds produces several level-ups in the same call, carrying the
//! XP remainder each time, so `xp < xp_to_next_level` always holds
//! afterwards.

use chrono::{Local, NaiveDate};

use crate::events::ChangeKind;
use crate::store::PlannerStore;

/// XP awarded for completing a lesson.
pub const BASE_XP: u32 = 15;
/// Extra XP per award while a streak is running.
pub const STREAK_BONUS_XP: u32 = 5;
/// XP required to leave level 1.
pub const BASE_XP_TO_LEVEL: u32 = 100;
/// Exponent of the level threshold power law.
pub const XP_EXPONENT: f64 = 1.5;

/// XP needed to complete `level`.
pub fn xp_threshold(level: u32) -> u32 {
    (BASE_XP_TO_LEVEL as f64 * (level as f64).powf(XP_EXPONENT)).floor() as u32
}

/// Outcome of an XP award, for collaborator feedback (toasts, level-up
/// celebration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpAward {
    /// XP actually credited, streak bonus included.
    pub earned: u32,
    /// Levels gained by this award (0 when no threshold was crossed).
    pub levels_gained: u32,
    /// The child's level after the award.
    pub new_level: u32,
}

/// Credit `amount` XP (plus the streak bonus when a streak is running) to
/// a child, resolving any level-ups.
///
/// Notifies `Xp`, and `Level` when at least one level-up occurred, then
/// queues a save. Unknown children are a silent no-op returning `None`.
pub fn award_xp(store: &mut PlannerStore, child_id: &str, amount: u32) -> Option<XpAward> {
    let child = store.children.iter_mut().find(|c| c.id == child_id)?;

    // Saturate: an absurd award caps out instead of wrapping.
    let earned = amount.saturating_add(if child.streak > 0 { STREAK_BONUS_XP } else { 0 });
    child.xp = child.xp.saturating_add(earned);

    let mut levels_gained = 0;
    while child.xp >= child.xp_to_next_level {
        child.xp -= child.xp_to_next_level;
        child.level += 1;
        child.xp_to_next_level = xp_threshold(child.level);
        levels_gained += 1;
    }
    let new_level = child.level;

    store.notify(ChangeKind::Xp);
    if levels_gained > 0 {
        store.notify(ChangeKind::Level);
    }
    store.queue_save();

    Some(XpAward {
        earned,
        levels_gained,
        new_level,
    })
}

/// Bump a child's streak if it has not moved yet today.
///
/// Returns whether the streak advanced. At most one increment per
/// calendar day, no matter how many lessons are completed.
pub fn update_streak(store: &mut PlannerStore, child_id: &str) -> bool {
    update_streak_on(store, child_id, Local::now().date_naive())
}

/// [`update_streak`] for an explicit calendar date.
pub fn update_streak_on(store: &mut PlannerStore, child_id: &str, today: NaiveDate) -> bool {
    let Some(child) = store.children.iter_mut().find(|c| c.id == child_id) else {
        return false;
    };
    if child.streak_last_updated == Some(today) {
        return false;
    }
    child.streak += 1;
    child.streak_last_updated = Some(today);
    store.queue_save();
    true
}

/// The full lesson-completion flow: mark the lesson done, then award XP
/// and advance the streak for its child.
///
/// The award runs before the streak update, so the streak bonus starts
/// paying out on the second consecutive day, not the first. Toggling an
/// already-completed lesson back to incomplete goes through
/// [`PlannerStore::toggle_lesson`] directly; XP is never clawed back.
pub fn complete_lesson(store: &mut PlannerStore, lesson_id: &str, amount: u32) -> Option<XpAward> {
    let lesson = store.lesson(lesson_id)?;
    if lesson.completed {
        return None;
    }
    let child_id = lesson.child_id.clone();

    store.toggle_lesson(lesson_id);
    let award = award_xp(store, &child_id, amount);
    update_streak(store, &child_id);
    award
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Child, LessonSpec, SubjectSpec};

    fn planner() -> PlannerStore {
        PlannerStore::new(vec![Child::new("1", "Prentiss", 4)])
    }

    #[test]
    fn threshold_follows_power_law() {
        assert_eq!(xp_threshold(1), 100);
        assert_eq!(xp_threshold(2), 282); // floor(100 * 2^1.5)
        assert_eq!(xp_threshold(3), 519); // floor(100 * 3^1.5)
    }

    #[test]
    fn exact_threshold_levels_up_to_zero_xp() {
        let mut store = planner();
        store.children[0].xp = 85;

        let award = award_xp(&mut store, "1", 15).unwrap();
        assert_eq!(award.earned, 15);
        assert_eq!(award.levels_gained, 1);
        assert_eq!(award.new_level, 2);

        let child = store.child("1").unwrap();
        assert_eq!(child.xp, 0);
        assert_eq!(child.level, 2);
        assert!(child.xp_to_next_level > 100);
        assert_eq!(child.xp_to_next_level, xp_threshold(2));
    }

    #[test]
    fn remainder_carries_forward() {
        let mut store = planner();
        store.children[0].xp = 95;

        award_xp(&mut store, "1", 20);
        let child = store.child("1").unwrap();
        assert_eq!(child.level, 2);
        assert_eq!(child.xp, 15);
    }

    #[test]
    fn oversized_award_resolves_multiple_levels() {
        let mut store = planner();

        // 100 (level 1) + 282 (level 2) + 10 remainder
        let award = award_xp(&mut store, "1", 392).unwrap();
        assert_eq!(award.levels_gained, 2);
        assert_eq!(award.new_level, 3);

        let child = store.child("1").unwrap();
        assert_eq!(child.level, 3);
        assert_eq!(child.xp, 10);
        assert!(child.xp < child.xp_to_next_level);
    }

    #[test]
    fn absurd_award_saturates_instead_of_wrapping() {
        let mut store = planner();
        store.children[0].streak = 1; // bonus on top of u32::MAX must not wrap

        let award = award_xp(&mut store, "1", u32::MAX).unwrap();
        assert_eq!(award.earned, u32::MAX);
        assert!(award.levels_gained > 0);

        let child = store.child("1").unwrap();
        assert!(child.xp < child.xp_to_next_level);
    }

    #[test]
    fn streak_bonus_applies_only_with_running_streak() {
        let mut store = planner();

        let cold = award_xp(&mut store, "1", BASE_XP).unwrap();
        assert_eq!(cold.earned, BASE_XP);

        store.children[0].streak = 3;
        let hot = award_xp(&mut store, "1", BASE_XP).unwrap();
        assert_eq!(hot.earned, BASE_XP + STREAK_BONUS_XP);
    }

    #[test]
    fn unknown_child_is_noop() {
        let mut store = planner();
        assert!(award_xp(&mut store, "9", 15).is_none());
        assert!(!update_streak(&mut store, "9"));
    }

    #[test]
    fn streak_moves_once_per_day() {
        let mut store = planner();
        let day = NaiveDate::from_ymd_opt(2025, 11, 17).unwrap();

        assert!(update_streak_on(&mut store, "1", day));
        assert!(!update_streak_on(&mut store, "1", day));
        assert_eq!(store.child("1").unwrap().streak, 1);

        let next_day = day.succ_opt().unwrap();
        assert!(update_streak_on(&mut store, "1", next_day));
        assert_eq!(store.child("1").unwrap().streak, 2);
    }

    #[test]
    fn level_notification_only_on_level_up() {
        use crate::events::ChangeKind;
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut store = planner();
        let kinds = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let kinds = Rc::clone(&kinds);
            store.subscribe(move |k| kinds.borrow_mut().push(k))
        };

        award_xp(&mut store, "1", 10);
        assert_eq!(*kinds.borrow(), vec![ChangeKind::Xp]);

        kinds.borrow_mut().clear();
        award_xp(&mut store, "1", 200);
        assert_eq!(*kinds.borrow(), vec![ChangeKind::Xp, ChangeKind::Level]);
    }

    #[test]
    fn complete_lesson_awards_once() {
        let mut store = planner();
        let subject = store.add_subject(SubjectSpec {
            name: "Math".to_string(),
            color: "#E07A5F".to_string(),
            child_id: "1".to_string(),
        });
        let lesson = store
            .add_lesson(LessonSpec {
                subject_id: subject.id,
                child_id: "1".to_string(),
                title: "Fractions".to_string(),
                day_of_week: 1,
                week_offset: None,
            })
            .unwrap();

        let award = complete_lesson(&mut store, &lesson.id, BASE_XP).unwrap();
        // First completion of the day: streak was 0 at award time.
        assert_eq!(award.earned, BASE_XP);
        assert!(store.lesson(&lesson.id).unwrap().completed);
        assert_eq!(store.child("1").unwrap().streak, 1);

        // Completing an already-completed lesson awards nothing.
        assert!(complete_lesson(&mut store, &lesson.id, BASE_XP).is_none());
    }
}
