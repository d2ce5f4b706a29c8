use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::document::{DocumentId, SectionKey};
use super::metadata::Metadata;
use crate::errors::{ExError, ExErrorKind};

/// Parsing state of an amending instrument's text
///
/// The only mutable attribute of an otherwise immutable amendment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl ParseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStatus::Pending => "pending",
            ParseStatus::Completed => "completed",
            ParseStatus::Failed => "failed",
        }
    }
}

impl FromStr for ParseStatus {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ParseStatus::Pending),
            "completed" => Ok(ParseStatus::Completed),
            "failed" => Ok(ParseStatus::Failed),
            other => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_status")
                .with_message(format!("unknown parse status '{}'", other))),
        }
    }
}

/// An amending instrument applied to one document
///
/// Ordered by effective date, ties broken by `sequence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amendment {
    /// Storage identity, referenced by [`SectionChange::amendment_id`]
    pub id: i64,
    pub document_id: DocumentId,
    /// Instrument identifier, e.g. `SFS 2010:123`
    pub instrument_id: String,
    pub title: Option<String>,
    pub effective_date: NaiveDate,
    pub publication_date: Option<NaiveDate>,
    pub sequence: u32,
    pub parse_status: ParseStatus,
    /// Opaque extension fields from ingestion
    pub metadata: Metadata,
}

impl Amendment {
    pub fn new(
        id: i64,
        document_id: DocumentId,
        instrument_id: impl Into<String>,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            document_id,
            instrument_id: instrument_id.into(),
            title: None,
            effective_date,
            publication_date: None,
            sequence: 0,
            parse_status: ParseStatus::default(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_publication_date(mut self, date: NaiveDate) -> Self {
        self.publication_date = Some(date);
        self
    }

    /// Chronological position: effective date, then sequence
    pub fn chronology(&self) -> (NaiveDate, u32) {
        (self.effective_date, self.sequence)
    }
}

/// What an amendment did to a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeKind {
    New,
    Amended,
    Repealed,
    /// The section now lives under a new key; `from` names the old one when known
    Renumbered { from: Option<SectionKey> },
}

impl ChangeKind {
    /// Stable uppercase code as persisted by ingestion
    pub fn code(&self) -> &'static str {
        match self {
            ChangeKind::New => "NEW",
            ChangeKind::Amended => "AMENDED",
            ChangeKind::Repealed => "REPEALED",
            ChangeKind::Renumbered { .. } => "RENUMBERED",
        }
    }

    /// Parse a persisted code; `from` only applies to renumbering
    ///
    /// # Errors
    ///
    /// `InvalidInput` for codes outside the closed set.
    pub fn from_code(code: &str, from: Option<SectionKey>) -> Result<Self, ExError> {
        match code.to_ascii_uppercase().as_str() {
            "NEW" => Ok(ChangeKind::New),
            "AMENDED" => Ok(ChangeKind::Amended),
            "REPEALED" => Ok(ChangeKind::Repealed),
            "RENUMBERED" => Ok(ChangeKind::Renumbered { from }),
            other => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_change_kind")
                .with_message(format!("unknown change type '{}'", other))),
        }
    }

    pub fn is_repeal(&self) -> bool {
        matches!(self, ChangeKind::Repealed)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One section-level edit attributed to one amendment
///
/// Carries the owning amendment's instrument id, effective date and
/// sequence so that the change log never needs a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionChange {
    pub amendment_id: i64,
    pub instrument_id: String,
    pub effective_date: NaiveDate,
    pub amendment_sequence: u32,
    pub key: SectionKey,
    pub kind: ChangeKind,
    /// `None` means the text could not be captured, which is not the same as empty text
    pub new_text: Option<String>,
    pub sort_order: u32,
}

impl SectionChange {
    /// Build a change joined to its amendment
    pub fn for_amendment(amendment: &Amendment, key: SectionKey, kind: ChangeKind) -> Self {
        Self {
            amendment_id: amendment.id,
            instrument_id: amendment.instrument_id.clone(),
            effective_date: amendment.effective_date,
            amendment_sequence: amendment.sequence,
            key,
            kind,
            new_text: None,
            sort_order: 0,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.new_text = Some(text.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: u32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Total chronological order of changes on a single section
    pub fn chronology(&self) -> (NaiveDate, u32, u32) {
        (self.effective_date, self.amendment_sequence, self.sort_order)
    }

    pub fn has_text(&self) -> bool {
        self.new_text.is_some()
    }
}
