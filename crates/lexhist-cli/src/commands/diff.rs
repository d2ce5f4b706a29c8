//! Diff command
//!
//! Usage: lexhist diff --doc <DOC> --from <A> --to <B> [--summary]

use chrono::NaiveDate;
use clap::Args;
use lexhist_core::diff::render_human_summary;
use lexhist_core::DocumentId;

use super::{print_json, CommandResult, Service};

#[derive(Debug, Args)]
pub struct DiffArgs {
    #[arg(long)]
    pub doc: DocumentId,

    /// Earlier date
    #[arg(long)]
    pub from: NaiveDate,

    /// Later date
    #[arg(long)]
    pub to: NaiveDate,

    /// Print a Markdown summary instead of JSON
    #[arg(long)]
    pub summary: bool,
}

pub fn execute(service: &Service, args: DiffArgs) -> CommandResult {
    let diff = service.diff_versions(&args.doc, args.from, args.to)?;
    if args.summary {
        print!("{}", render_human_summary(&diff));
        Ok(())
    } else {
        print_json(diff.as_ref())
    }
}
