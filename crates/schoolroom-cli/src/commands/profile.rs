//! Child profile and progression commands.

use clap::Subcommand;
use schoolroom_core::{award_xp, update_streak};

use super::{resolve_child, CliResult, Planner};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show every child's progression
    Show,
    /// Award XP to a child directly
    Award {
        /// Child id or name
        child: String,
        /// XP amount (default: the configured per-lesson base)
        #[arg(long)]
        amount: Option<u32>,
    },
    /// Advance a child's daily streak
    Streak {
        /// Child id or name
        child: String,
    },
}

pub fn run(action: ProfileAction) -> CliResult {
    let mut planner = Planner::open()?;

    match action {
        ProfileAction::Show => {
            println!("{}", serde_json::to_string_pretty(planner.store.children())?);
        }
        ProfileAction::Award { child, amount } => {
            let child_id = resolve_child(&planner.store, &child)?;
            let amount = amount.unwrap_or(planner.config.gamification.base_xp);
            let award = award_xp(&mut planner.store, &child_id, amount)
                .ok_or_else(|| format!("no child with id '{child_id}'"))?;
            println!("+{} XP!", award.earned);
            if award.levels_gained > 0 {
                println!("Level up! Now level {}.", award.new_level);
            }
        }
        ProfileAction::Streak { child } => {
            let child_id = resolve_child(&planner.store, &child)?;
            if update_streak(&mut planner.store, &child_id) {
                let streak = planner.store.child(&child_id).map(|c| c.streak).unwrap_or(0);
                println!("Streak: {streak} day(s)");
            } else {
                println!("Streak already counted today.");
            }
        }
    }

    planner.finish();
    Ok(())
}
