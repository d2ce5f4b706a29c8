//! Reconstruction output types.
//!
//! All types are serializable so a result can be stored in the shared cache
//! tier and read back by another process.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Amendment, ChangeKind, DocumentId, SectionChange, SectionKey};

/// Where a reconstructed section's text came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionSource {
    /// Current canonical text, unchanged since enactment as far as the log knows
    Current,
    /// Text set by the named amending instrument
    Amendment { instrument_id: String },
    /// The section did not exist on the date (repealed or not yet introduced)
    NotExists,
}

/// A change that had taken effect by the reconstruction date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedAmendment {
    pub instrument_id: String,
    pub effective_date: NaiveDate,
    pub change_type: ChangeKind,
    pub has_text: bool,
}

impl From<&SectionChange> for AppliedAmendment {
    fn from(change: &SectionChange) -> Self {
        Self {
            instrument_id: change.instrument_id.clone(),
            effective_date: change.effective_date,
            change_type: change.kind.clone(),
            has_text: change.has_text(),
        }
    }
}

/// One section as it read on the reconstruction date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionVersion {
    pub key: SectionKey,
    /// `None` when the section did not exist or its text is unavailable
    pub text: Option<String>,
    pub text_unavailable: bool,
    pub source: SectionSource,
    /// Changes on or before the date, oldest first
    pub amendments_applied: Vec<AppliedAmendment>,
}

impl SectionVersion {
    /// The section existed on the date (possibly with unavailable text)
    pub fn exists(&self) -> bool {
        self.source != SectionSource::NotExists
    }
}

/// Reference to an amending instrument, used for "since" and "between" lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmendmentRef {
    pub instrument_id: String,
    pub title: Option<String>,
    pub effective_date: NaiveDate,
}

impl From<&Amendment> for AmendmentRef {
    fn from(amendment: &Amendment) -> Self {
        Self {
            instrument_id: amendment.instrument_id.clone(),
            title: amendment.title.clone(),
            effective_date: amendment.effective_date,
        }
    }
}

/// Aggregate counts over a reconstruction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMeta {
    /// Sections in the current canonical text
    pub current_section_count: usize,
    /// Sections that existed on the date
    pub historical_section_count: usize,
    /// Current sections that did not yet exist on the date
    pub sections_added_later: usize,
    /// Existing sections whose text could not be captured
    pub sections_text_unavailable: usize,
}

/// A document's full section set as of one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawVersionResult {
    pub document_id: DocumentId,
    pub as_of: NaiveDate,
    /// Every known section key in natural order, including non-existent ones
    pub sections: Vec<SectionVersion>,
    /// Amendments effective after `as_of`, oldest first
    pub amendments_since: Vec<AmendmentRef>,
    pub meta: VersionMeta,
}

impl LawVersionResult {
    pub fn section(&self, key: &SectionKey) -> Option<&SectionVersion> {
        self.sections
            .binary_search_by(|s| s.key.cmp(key))
            .ok()
            .map(|idx| &self.sections[idx])
    }

    /// Sections that existed on the date
    pub fn present_sections(&self) -> impl Iterator<Item = &SectionVersion> {
        self.sections.iter().filter(|s| s.exists())
    }

    /// Text of a section if it existed with captured text
    pub fn text_of(&self, key: &SectionKey) -> Option<&str> {
        self.section(key).and_then(|s| s.text.as_deref())
    }
}
