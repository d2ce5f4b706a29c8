//! lexhist CLI
//!
//! Point-in-time reads and diffs of statutes stored in a SQLite database.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "lexhist")]
#[command(about = "lexhist - historical versions of Swedish statutes", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconstruct a document as of a date
    Version(commands::version::VersionArgs),
    /// Diff a document between two dates
    Diff(commands::diff::DiffArgs),
    /// Every recorded state of one section
    History(commands::history::HistoryArgs),
    /// Amendments to a document, newest first
    Timeline(commands::history::TimelineArgs),
    /// Dates on which a document changed
    Dates(commands::history::DatesArgs),
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(&cli.global);

    let result = commands::open_service(&cli.global).and_then(|service| match cli.command {
        Commands::Version(args) => commands::version::execute(&service, args),
        Commands::Diff(args) => commands::diff::execute(&service, args),
        Commands::History(args) => commands::history::execute_history(&service, args),
        Commands::Timeline(args) => commands::history::execute_timeline(&service, args),
        Commands::Dates(args) => commands::history::execute_dates(&service, args),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
