use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "schoolroom-cli", version, about = "Schoolroom CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Subject management
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Lesson management
    Lesson {
        #[command(subcommand)]
        action: commands::lesson::LessonAction,
    },
    /// Today's lessons (weekends show Monday)
    Today(commands::schedule::TodayArgs),
    /// Weekly schedule grid
    Week(commands::schedule::WeekArgs),
    /// Weekly completion progress per child
    Progress(commands::schedule::ProgressArgs),
    /// Child profiles and progression
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Subject { action } => commands::subject::run(action),
        Commands::Lesson { action } => commands::lesson::run(action),
        Commands::Today(args) => commands::schedule::run_today(args),
        Commands::Week(args) => commands::schedule::run_week(args),
        Commands::Progress(args) => commands::schedule::run_progress(args),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
