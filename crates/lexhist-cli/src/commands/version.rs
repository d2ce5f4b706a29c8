//! Version command
//!
//! Usage: lexhist version --doc <DOC> --date <YYYY-MM-DD>

use chrono::NaiveDate;
use clap::Args;
use lexhist_core::DocumentId;

use super::{print_json, CommandResult, Service};

#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Document id, e.g. "1977:1160" or "SFS 1977:1160"
    #[arg(long)]
    pub doc: DocumentId,

    /// Reconstruction date
    #[arg(long)]
    pub date: NaiveDate,
}

pub fn execute(service: &Service, args: VersionArgs) -> CommandResult {
    let version = service.reconstruct(&args.doc, args.date)?;
    print_json(version.as_ref())
}
