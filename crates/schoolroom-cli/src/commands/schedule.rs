//! Schedule view commands: today, week, and progress.

use clap::Args;
use schoolroom_core::{Lesson, PlannerStore};

use super::{child_filter, CliResult, Planner};

const DAY_NAMES: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

#[derive(Args)]
pub struct TodayArgs {
    /// Filter by child id or name
    #[arg(long)]
    pub child: Option<String>,
}

#[derive(Args)]
pub struct WeekArgs {
    /// Week offset: 0 = this week, 1 = next, -1 = last
    #[arg(long, default_value = "0")]
    pub offset: i32,
    /// Filter by child id or name
    #[arg(long)]
    pub child: Option<String>,
}

#[derive(Args)]
pub struct ProgressArgs {
    /// Week offset (default: 0)
    #[arg(long, default_value = "0")]
    pub offset: i32,
}

pub fn run_today(args: TodayArgs) -> CliResult {
    let mut planner = Planner::open()?;
    let filter = child_filter(&planner.store, args.child.as_deref())?;
    planner.store.set_child(filter);

    let lessons = planner.store.todays_lessons();
    if lessons.is_empty() {
        println!("No lessons scheduled for today.");
        return Ok(());
    }
    for lesson in lessons {
        print_lesson_line(&planner.store, lesson);
    }
    Ok(())
}

pub fn run_week(args: WeekArgs) -> CliResult {
    let mut planner = Planner::open()?;
    let filter = child_filter(&planner.store, args.child.as_deref())?;
    planner.store.set_child(filter);
    planner.store.set_week_offset(args.offset);

    for (day, name) in (1u8..=5).zip(DAY_NAMES) {
        println!("{name}:");
        let lessons = planner.store.lessons_for_day(day);
        if lessons.is_empty() {
            println!("  (no lessons)");
            continue;
        }
        for lesson in lessons {
            print!("  ");
            print_lesson_line(&planner.store, lesson);
        }
    }
    Ok(())
}

pub fn run_progress(args: ProgressArgs) -> CliResult {
    let mut planner = Planner::open()?;
    planner.store.set_week_offset(args.offset);

    for child in planner.store.children() {
        let pct = planner.store.progress_for_child(&child.id);
        println!(
            "{} {} — level {}, {}/{} XP, {} day streak: {pct}% of this week's lessons done",
            child.avatar, child.name, child.level, child.xp, child.xp_to_next_level, child.streak
        );
    }
    Ok(())
}

fn print_lesson_line(store: &PlannerStore, lesson: &Lesson) {
    let mark = if lesson.completed { "x" } else { " " };
    let subject = store
        .subject(&lesson.subject_id)
        .map(|s| s.name.as_str())
        .unwrap_or("?");
    let child = store
        .child(&lesson.child_id)
        .map(|c| c.name.as_str())
        .unwrap_or("?");
    let tag = if lesson.rescheduled {
        " (rescheduled)"
    } else {
        ""
    };
    println!(
        "[{mark}] {} — {subject} / {child}{tag}  ({})",
        lesson.title, lesson.id
    );
}
