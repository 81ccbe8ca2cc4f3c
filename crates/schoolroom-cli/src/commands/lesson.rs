//! Lesson management commands for CLI.

use clap::Subcommand;
use schoolroom_core::{complete_lesson, reschedule_lesson, LessonSpec};

use super::{child_filter, resolve_child, resolve_subject, CliResult, Planner};

#[derive(Subcommand)]
pub enum LessonAction {
    /// Create a new lesson
    Add {
        /// Lesson title
        title: String,
        /// Subject id or name
        #[arg(long)]
        subject: String,
        /// Child id or name (needed when the subject name is shared)
        #[arg(long)]
        child: Option<String>,
        /// School day, 1 (Monday) through 5 (Friday)
        #[arg(long)]
        day: u8,
        /// Week offset, 0 = this week (default: 0)
        #[arg(long)]
        week: Option<i32>,
    },
    /// List lessons for a week
    List {
        /// Filter by child id or name
        #[arg(long)]
        child: Option<String>,
        /// Week offset (default: 0)
        #[arg(long, default_value = "0")]
        week: i32,
    },
    /// Mark a lesson completed and award XP
    Done {
        /// Lesson ID
        id: String,
    },
    /// Toggle a completed lesson back to incomplete (no XP clawback)
    Undo {
        /// Lesson ID
        id: String,
    },
    /// Push a missed lesson (and the rest of its subject chain) one school day
    Reschedule {
        /// Lesson ID
        id: String,
    },
    /// Delete a lesson
    Remove {
        /// Lesson ID
        id: String,
    },
}

pub fn run(action: LessonAction) -> CliResult {
    let mut planner = Planner::open()?;

    match action {
        LessonAction::Add {
            title,
            subject,
            child,
            day,
            week,
        } => {
            let child_id = child
                .as_deref()
                .map(|key| resolve_child(&planner.store, key))
                .transpose()?;
            let subject_id = resolve_subject(&planner.store, &subject, child_id.as_deref())?;
            // Derive the owning child from the subject, as the original
            // entry form did.
            let child_id = planner
                .store
                .subject(&subject_id)
                .map(|s| s.child_id.clone())
                .unwrap_or_default();

            let lesson = planner.store.add_lesson(LessonSpec {
                subject_id,
                child_id,
                title,
                day_of_week: day,
                week_offset: week,
            })?;
            println!("Lesson created: {}", lesson.id);
            println!("{}", serde_json::to_string_pretty(&lesson)?);
        }
        LessonAction::List { child, week } => {
            let filter = child_filter(&planner.store, child.as_deref())?;
            planner.store.set_child(filter);
            planner.store.set_week_offset(week);
            let lessons = planner.store.lessons_for_active_view();
            println!("{}", serde_json::to_string_pretty(&lessons)?);
        }
        LessonAction::Done { id } => {
            let base_xp = planner.config.gamification.base_xp;
            match complete_lesson(&mut planner.store, &id, base_xp) {
                Some(award) => {
                    println!("+{} XP!", award.earned);
                    if award.levels_gained > 0 {
                        println!("Level up! Now level {}.", award.new_level);
                    }
                }
                None => return Err(format!("no incomplete lesson with id '{id}'").into()),
            }
        }
        LessonAction::Undo { id } => {
            match planner.store.lesson(&id) {
                Some(lesson) if lesson.completed => planner.store.toggle_lesson(&id),
                _ => return Err(format!("no completed lesson with id '{id}'").into()),
            }
            println!("Lesson reopened: {id}");
        }
        LessonAction::Reschedule { id } => {
            let shifted = reschedule_lesson(&mut planner.store, &id);
            if shifted == 0 {
                return Err(format!("no incomplete lesson with id '{id}'").into());
            }
            println!("Rescheduled {shifted} lesson(s)");
        }
        LessonAction::Remove { id } => {
            if planner.store.lesson(&id).is_none() {
                return Err(format!("no lesson with id '{id}'").into());
            }
            planner.store.remove_lesson(&id);
            println!("Lesson removed: {id}");
        }
    }

    planner.finish();
    Ok(())
}
