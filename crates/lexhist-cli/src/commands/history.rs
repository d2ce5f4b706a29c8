//! Section history, amendment timeline and version dates

use clap::Args;
use lexhist_core::{DocumentId, SectionKey};

use super::{print_json, CommandResult, Service};

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long)]
    pub doc: DocumentId,

    /// Chapter, omitted for laws without chapters
    #[arg(long)]
    pub chapter: Option<String>,

    /// Section number, e.g. "2" or "2a"
    #[arg(long)]
    pub section: String,
}

#[derive(Debug, Args)]
pub struct TimelineArgs {
    #[arg(long)]
    pub doc: DocumentId,
}

#[derive(Debug, Args)]
pub struct DatesArgs {
    #[arg(long)]
    pub doc: DocumentId,
}

pub fn execute_history(service: &Service, args: HistoryArgs) -> CommandResult {
    let key = SectionKey::try_new(args.chapter.as_deref(), &args.section)?;
    let history = service.section_history(&args.doc, &key)?;
    print_json(&history)
}

pub fn execute_timeline(service: &Service, args: TimelineArgs) -> CommandResult {
    let timeline = service.amendment_timeline(&args.doc)?;
    print_json(timeline.as_ref())
}

pub fn execute_dates(service: &Service, args: DatesArgs) -> CommandResult {
    let dates = service.available_version_dates(&args.doc)?;
    print_json(&dates)
}
