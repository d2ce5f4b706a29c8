//! Version diff computation engine.
//!
//! The core entry point is [`diff_versions`], which loads a document once,
//! reconstructs it on both dates and classifies every section.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::changelog::SectionChangeLog;
use crate::diff::model::{
    count_lines, DiffOp, DiffPart, DiffSummary, LawVersionDiff, SectionChangeType, SectionDiff,
};
use crate::diff::myers::{self, Edit};
use crate::errors::{LawHistoryError, Result};
use crate::model::{DocumentId, SectionKey};
use crate::normalize::{semantically_equal, unify_line_endings};
use crate::reconstruct::{reconstruct_from, AmendmentRef, AppliedAmendment, LawVersionResult, SectionVersion};
use crate::source::LawSource;

/// Reject an inverted range before any work is done
///
/// # Errors
///
/// `InvalidDateRange` when `date_a` is after `date_b`.
pub fn validate_range(date_a: NaiveDate, date_b: NaiveDate) -> Result<()> {
    if date_a > date_b {
        return Err(LawHistoryError::InvalidDateRange { date_a, date_b }.into());
    }
    Ok(())
}

/// Diff a document's versions on two dates
///
/// # Errors
///
/// `InvalidDateRange` for `date_a > date_b`, `NotFound` for an unknown
/// document; storage errors pass through.
pub fn diff_versions<S: LawSource + ?Sized>(
    source: &S,
    document_id: &DocumentId,
    date_a: NaiveDate,
    date_b: NaiveDate,
) -> Result<LawVersionDiff> {
    validate_range(date_a, date_b)?;
    let current = source.get_current_sections(document_id)?;
    let log = SectionChangeLog::load(source, document_id)?;
    let version_a = reconstruct_from(&log, &current, date_a);
    let version_b = reconstruct_from(&log, &current, date_b);
    Ok(diff_reconstructions(&log, &version_a, &version_b))
}

/// Classify every section present in either reconstruction
pub fn diff_reconstructions(
    log: &SectionChangeLog,
    version_a: &LawVersionResult,
    version_b: &LawVersionResult,
) -> LawVersionDiff {
    let (date_a, date_b) = (version_a.as_of, version_b.as_of);

    let keys: BTreeSet<&SectionKey> = version_a
        .present_sections()
        .chain(version_b.present_sections())
        .map(|s| &s.key)
        .collect();

    let mut summary = DiffSummary::default();
    let mut sections = Vec::with_capacity(keys.len());

    for key in keys {
        let between: Vec<AppliedAmendment> = log
            .changes_between(key, date_a, date_b)
            .iter()
            .map(AppliedAmendment::from)
            .collect();
        let side_a = version_a.section(key).filter(|s| s.exists());
        let side_b = version_b.section(key).filter(|s| s.exists());
        let section = diff_section(key, side_a, side_b, between);

        match section.change_type {
            SectionChangeType::Added => summary.sections_added += 1,
            SectionChangeType::Removed => summary.sections_removed += 1,
            SectionChangeType::Modified => summary.sections_modified += 1,
            SectionChangeType::Unchanged => summary.sections_unchanged += 1,
        }
        summary.total_lines_added += section.lines_added;
        summary.total_lines_removed += section.lines_removed;
        sections.push(section);
    }

    LawVersionDiff {
        document_id: version_a.document_id.clone(),
        date_a,
        date_b,
        sections,
        summary,
        amendments_between: log
            .amendments_between(date_a, date_b)
            .iter()
            .map(AmendmentRef::from)
            .collect(),
    }
}

fn diff_section(
    key: &SectionKey,
    side_a: Option<&SectionVersion>,
    side_b: Option<&SectionVersion>,
    amendments_between: Vec<AppliedAmendment>,
) -> SectionDiff {
    let mut diff = SectionDiff {
        key: key.clone(),
        change_type: SectionChangeType::Unchanged,
        line_diff: Vec::new(),
        lines_added: 0,
        lines_removed: 0,
        text_unavailable: false,
        text_a: side_a.and_then(|s| s.text.clone()),
        text_b: side_b.and_then(|s| s.text.clone()),
        amendments_between,
    };

    match (side_a, side_b) {
        (None, None) => {}
        (None, Some(b)) => {
            diff.change_type = SectionChangeType::Added;
            diff.text_unavailable = b.text_unavailable;
            diff.lines_added = b.text.as_deref().map(count_lines).unwrap_or(0);
        }
        (Some(a), None) => {
            diff.change_type = SectionChangeType::Removed;
            diff.text_unavailable = a.text_unavailable;
            diff.lines_removed = a.text.as_deref().map(count_lines).unwrap_or(0);
        }
        (Some(_), Some(_)) if diff.amendments_between.is_empty() => {}
        (Some(a), Some(b)) => match (a.text.as_deref(), b.text.as_deref()) {
            (Some(text_a), Some(text_b)) => {
                if !semantically_equal(text_a, text_b) {
                    diff.change_type = SectionChangeType::Modified;
                    diff.line_diff = line_diff(text_a, text_b);
                    for part in &diff.line_diff {
                        match part.op {
                            DiffOp::Added => diff.lines_added += part.line_count(),
                            DiffOp::Removed => diff.lines_removed += part.line_count(),
                            DiffOp::Equal => {}
                        }
                    }
                }
            }
            _ => {
                diff.change_type = SectionChangeType::Modified;
                diff.text_unavailable = true;
            }
        },
    }
    diff
}

/// Word-level diff of two raw texts
///
/// Only line endings are unified and the ends trimmed, so the parts keep
/// the visible formatting of each side. Consecutive tokens with the same
/// operation are merged into one part.
pub fn line_diff(text_a: &str, text_b: &str) -> Vec<DiffPart> {
    let a = unify_line_endings(text_a);
    let b = unify_line_endings(text_b);
    let tokens_a = tokenize(a.trim());
    let tokens_b = tokenize(b.trim());

    let mut parts: Vec<DiffPart> = Vec::new();
    for edit in myers::diff(&tokens_a, &tokens_b) {
        let (op, token) = match edit {
            Edit::Equal { a, .. } => (DiffOp::Equal, tokens_a[a]),
            Edit::Delete { a } => (DiffOp::Removed, tokens_a[a]),
            Edit::Insert { b } => (DiffOp::Added, tokens_b[b]),
        };
        match parts.last_mut() {
            Some(last) if last.op == op => last.value.push_str(token),
            _ => parts.push(DiffPart {
                op,
                value: token.to_string(),
            }),
        }
    }
    parts
}

/// Split into alternating runs of whitespace and non-whitespace
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (idx, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|s| s != space) {
            tokens.push(&text[start..idx]);
            start = idx;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Sections whose classification is not `unchanged`
pub fn changed_sections(diff: &LawVersionDiff) -> Vec<&SectionDiff> {
    diff.sections
        .iter()
        .filter(|s| s.change_type != SectionChangeType::Unchanged)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_whitespace_runs() {
        assert_eq!(tokenize("ett  två\ntre"), vec!["ett", "  ", "två", "\n", "tre"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_line_diff_merges_consecutive_parts() {
        let parts = line_diff("X v1", "X v2");
        assert_eq!(
            parts,
            vec![
                DiffPart {
                    op: DiffOp::Equal,
                    value: "X ".to_string()
                },
                DiffPart {
                    op: DiffOp::Removed,
                    value: "v1".to_string()
                },
                DiffPart {
                    op: DiffOp::Added,
                    value: "v2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_line_diff_unifies_line_endings_only() {
        let parts = line_diff("rad ett\r\nrad två  ", "rad ett\nrad två");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].op, DiffOp::Equal);
    }

    #[test]
    fn test_validate_range_rejects_inverted() {
        let a = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        assert!(validate_range(a, b).is_err());
        assert!(validate_range(b, a).is_ok());
        assert!(validate_range(a, a).is_ok());
    }

    #[test]
    fn test_line_diff_of_wholesale_rewrite() {
        let text_a: Vec<String> = (0..3000).map(|i| format!("gammal{}", i)).collect();
        let text_b: Vec<String> = (0..3000).map(|i| format!("ny{}", i)).collect();
        let (text_a, text_b) = (text_a.join(" "), text_b.join(" "));

        let parts = line_diff(&text_a, &text_b);

        let side = |keep: DiffOp| -> String {
            parts
                .iter()
                .filter(|p| p.op == DiffOp::Equal || p.op == keep)
                .map(|p| p.value.as_str())
                .collect()
        };
        assert_eq!(side(DiffOp::Removed), text_a);
        assert_eq!(side(DiffOp::Added), text_b);
        assert!(parts
            .iter()
            .filter(|p| p.op == DiffOp::Equal)
            .all(|p| p.value.trim().is_empty()));
    }
}

