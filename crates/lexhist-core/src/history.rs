//! Section history and amendment timeline views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::changelog::SectionChangeLog;
use crate::errors::{LawHistoryError, Result};
use crate::model::{ChangeKind, DocumentId, SectionChange, SectionKey};
use crate::source::LawSource;

/// One step in a section's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The entry describing today's canonical text
    pub is_current: bool,
    /// `None` for text unchanged since enactment
    pub instrument_id: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub change_type: Option<ChangeKind>,
    pub text: Option<String>,
    pub text_unavailable: bool,
}

impl HistoryEntry {
    fn from_change(change: &SectionChange) -> Self {
        Self {
            is_current: false,
            instrument_id: Some(change.instrument_id.clone()),
            effective_date: Some(change.effective_date),
            change_type: Some(change.kind.clone()),
            text: change.new_text.clone(),
            text_unavailable: change.new_text.is_none() && !change.kind.is_repeal(),
        }
    }

    /// Unchanged since enactment
    pub fn is_original(&self) -> bool {
        self.change_type.is_none()
    }
}

/// Full history of one section, newest first
///
/// A section that exists today starts with a current entry tagged with its
/// latest change (or as original text), followed by every change in
/// descending chronological order.
///
/// # Errors
///
/// `NotFound` when the document is unknown or the section has neither
/// current text nor any recorded change.
pub fn section_history<S: LawSource + ?Sized>(
    source: &S,
    document_id: &DocumentId,
    key: &SectionKey,
) -> Result<Vec<HistoryEntry>> {
    let current = source
        .get_current_sections(document_id)?
        .into_iter()
        .find(|s| &s.key == key);
    let log = SectionChangeLog::load(source, document_id)?;
    let changes = log.changes_for(key);

    if current.is_none() && changes.is_empty() {
        return Err(LawHistoryError::SectionNotFound {
            document_id: document_id.to_string(),
            section: key.to_string(),
        }
        .into());
    }

    let mut entries = Vec::with_capacity(changes.len() + 1);
    if let Some(section) = current {
        let latest = changes.last();
        entries.push(HistoryEntry {
            is_current: true,
            instrument_id: latest.map(|c| c.instrument_id.clone()),
            effective_date: latest.map(|c| c.effective_date),
            change_type: latest.map(|c| c.kind.clone()),
            text: Some(section.text),
            text_unavailable: false,
        });
    }
    entries.extend(changes.iter().rev().map(HistoryEntry::from_change));
    Ok(entries)
}

/// Per-amendment counts of each change type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTypeCounts {
    pub new: usize,
    pub amended: usize,
    pub repealed: usize,
    pub renumbered: usize,
}

impl ChangeTypeCounts {
    fn record(&mut self, kind: &ChangeKind) {
        match kind {
            ChangeKind::New => self.new += 1,
            ChangeKind::Amended => self.amended += 1,
            ChangeKind::Repealed => self.repealed += 1,
            ChangeKind::Renumbered { .. } => self.renumbered += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.new + self.amended + self.repealed + self.renumbered
    }
}

/// One amending instrument in a document's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub instrument_id: String,
    pub title: Option<String>,
    pub effective_date: NaiveDate,
    pub publication_date: Option<NaiveDate>,
    pub section_count: usize,
    pub change_counts: ChangeTypeCounts,
}

/// All amendments of a document with per-type change counts, newest first
///
/// # Errors
///
/// `NotFound` for an unknown document; storage errors pass through.
pub fn amendment_timeline<S: LawSource + ?Sized>(
    source: &S,
    document_id: &DocumentId,
) -> Result<Vec<TimelineEntry>> {
    let log = SectionChangeLog::load(source, document_id)?;
    Ok(timeline_from(&log))
}

/// Timeline over an already-loaded change log
pub fn timeline_from(log: &SectionChangeLog) -> Vec<TimelineEntry> {
    log.amendments()
        .iter()
        .rev()
        .map(|amendment| {
            let changes = log.changes_by_amendment(amendment.id);
            let mut counts = ChangeTypeCounts::default();
            for change in &changes {
                counts.record(&change.kind);
            }
            TimelineEntry {
                instrument_id: amendment.instrument_id.clone(),
                title: amendment.title.clone(),
                effective_date: amendment.effective_date,
                publication_date: amendment.publication_date,
                section_count: changes.len(),
                change_counts: counts,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::model::{Amendment, LegalDocument};
    use crate::source::MemoryLawSource;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fixture() -> (MemoryLawSource, DocumentId) {
        let doc = DocumentId::new("2010:800");
        let source = MemoryLawSource::new();
        source.insert_document(
            LegalDocument::new(doc.clone(), "Skollag")
                .with_section(SectionKey::top_level("1"), "Original.")
                .with_section(SectionKey::top_level("2"), "v1"),
        );
        let a1 = Amendment::new(1, doc.clone(), "SFS 2012:1", date("2012-01-01"))
            .with_title("Lag om ändring i skollagen");
        let a2 = Amendment::new(2, doc.clone(), "SFS 2014:1", date("2014-01-01"));
        source
            .commit_amendment(
                a1.clone(),
                vec![
                    SectionChange::for_amendment(&a1, SectionKey::top_level("2"), ChangeKind::Amended)
                        .with_text("v2"),
                    SectionChange::for_amendment(&a1, SectionKey::top_level("3"), ChangeKind::New)
                        .with_text("Ny paragraf."),
                ],
            )
            .unwrap();
        source
            .commit_amendment(
                a2.clone(),
                vec![SectionChange::for_amendment(&a2, SectionKey::top_level("3"), ChangeKind::Repealed)],
            )
            .unwrap();
        (source, doc)
    }

    #[test]
    fn test_history_current_entry_first_then_descending() {
        let (source, doc) = fixture();
        let history = section_history(&source, &doc, &SectionKey::top_level("2")).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].is_current);
        assert_eq!(history[0].text.as_deref(), Some("v2"));
        assert_eq!(history[0].instrument_id.as_deref(), Some("SFS 2012:1"));
        assert!(!history[1].is_current);
    }

    #[test]
    fn test_history_of_untouched_section_is_original() {
        let (source, doc) = fixture();
        let history = section_history(&source, &doc, &SectionKey::top_level("1")).unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].is_original());
    }

    #[test]
    fn test_history_of_repealed_section_has_no_current_entry() {
        let (source, doc) = fixture();
        let history = section_history(&source, &doc, &SectionKey::top_level("3")).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|h| !h.is_current));
        assert_eq!(history[0].change_type, Some(ChangeKind::Repealed));
        assert!(!history[0].text_unavailable);
    }

    #[test]
    fn test_history_unknown_section_not_found() {
        let (source, doc) = fixture();
        let err = section_history(&source, &doc, &SectionKey::top_level("99")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }

    #[test]
    fn test_timeline_newest_first_with_counts() {
        let (source, doc) = fixture();
        let timeline = amendment_timeline(&source, &doc).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].instrument_id, "SFS 2014:1");
        assert_eq!(timeline[0].change_counts.repealed, 1);
        assert_eq!(timeline[1].section_count, 2);
        assert_eq!(timeline[1].change_counts.new, 1);
        assert_eq!(timeline[1].change_counts.amended, 1);
        assert_eq!(timeline[1].title.as_deref(), Some("Lag om ändring i skollagen"));
    }
}
