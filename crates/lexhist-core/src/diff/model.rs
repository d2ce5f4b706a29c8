//! Version diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq` so a
//! diff can round-trip through the shared cache tier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{DocumentId, SectionKey};
use crate::reconstruct::{AmendmentRef, AppliedAmendment};

/// Classification of one section between the two dates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SectionChangeType {
    Unchanged,
    Added,
    Removed,
    Modified,
}

impl SectionChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionChangeType::Unchanged => "unchanged",
            SectionChangeType::Added => "added",
            SectionChangeType::Removed => "removed",
            SectionChangeType::Modified => "modified",
        }
    }
}

/// Edit operation of a diff part
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffOp {
    Equal,
    Added,
    Removed,
}

/// A run of consecutive tokens sharing one edit operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffPart {
    pub op: DiffOp,
    pub value: String,
}

impl DiffPart {
    /// Non-blank lines covered by this part
    pub fn line_count(&self) -> usize {
        count_lines(&self.value)
    }
}

/// Non-blank lines in a text
pub fn count_lines(text: &str) -> usize {
    text.split('\n').filter(|l| !l.trim().is_empty()).count()
}

/// Structured change of one section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionDiff {
    pub key: SectionKey,
    pub change_type: SectionChangeType,
    /// Word-level diff parts; empty unless `modified` with both texts known
    pub line_diff: Vec<DiffPart>,
    pub lines_added: usize,
    pub lines_removed: usize,
    pub text_unavailable: bool,
    pub text_a: Option<String>,
    pub text_b: Option<String>,
    /// Changes to this section effective in `(date_a, date_b]`, oldest first
    pub amendments_between: Vec<AppliedAmendment>,
}

/// Aggregate counts across all sections
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSummary {
    pub sections_added: usize,
    pub sections_removed: usize,
    pub sections_modified: usize,
    pub sections_unchanged: usize,
    pub total_lines_added: usize,
    pub total_lines_removed: usize,
}

impl DiffSummary {
    pub fn has_changes(&self) -> bool {
        self.sections_added + self.sections_removed + self.sections_modified > 0
    }
}

/// The full diff between a document's versions on two dates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LawVersionDiff {
    pub document_id: DocumentId,
    pub date_a: NaiveDate,
    pub date_b: NaiveDate,
    /// One entry per section present on either date, natural key order
    pub sections: Vec<SectionDiff>,
    pub summary: DiffSummary,
    /// Amendments effective in `(date_a, date_b]`, oldest first
    pub amendments_between: Vec<AmendmentRef>,
}
