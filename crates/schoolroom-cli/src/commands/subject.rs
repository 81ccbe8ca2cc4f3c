//! Subject management commands for CLI.

use clap::Subcommand;
use schoolroom_core::SubjectSpec;

use super::{child_filter, resolve_child, CliResult, Planner};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Create a new subject
    Add {
        /// Subject name
        name: String,
        /// Display color (hex token)
        #[arg(long, default_value = "#E07A5F")]
        color: String,
        /// Child id or name; omit to create one subject per child
        #[arg(long)]
        child: Option<String>,
    },
    /// List subjects
    List {
        /// Filter by child id or name
        #[arg(long)]
        child: Option<String>,
    },
    /// Delete a subject and all of its lessons
    Remove {
        /// Subject ID
        id: String,
    },
}

pub fn run(action: SubjectAction) -> CliResult {
    let mut planner = Planner::open()?;

    match action {
        SubjectAction::Add { name, color, child } => {
            let created = match child {
                Some(key) => {
                    let child_id = resolve_child(&planner.store, &key)?;
                    vec![planner.store.add_subject(SubjectSpec {
                        name,
                        color,
                        child_id,
                    })]
                }
                None => planner.store.add_subject_shared(&name, &color),
            };
            for subject in &created {
                println!("Subject created: {}", subject.id);
            }
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        SubjectAction::List { child } => {
            let filter = child_filter(&planner.store, child.as_deref())?;
            let subjects = planner.store.subjects_for_child(&filter);
            println!("{}", serde_json::to_string_pretty(&subjects)?);
        }
        SubjectAction::Remove { id } => {
            if planner.store.subject(&id).is_none() {
                return Err(format!("no subject with id '{id}'").into());
            }
            planner.store.remove_subject(&id);
            println!("Subject removed: {id}");
        }
    }

    planner.finish();
    Ok(())
}
