//! Reconstruction engine.
//!
//! [`reconstruct`] loads from a [`LawSource`]; [`reconstruct_from`] is the
//! pure core that works on already-loaded data so that a diff can load once
//! and reconstruct both dates.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::changelog::SectionChangeLog;
use crate::errors::Result;
use crate::model::{ChangeKind, DocumentId, Section, SectionChange, SectionKey};
use crate::reconstruct::model::{
    AmendmentRef, AppliedAmendment, LawVersionResult, SectionSource, SectionVersion, VersionMeta,
};
use crate::source::LawSource;

/// Reconstruct a document as it read on `as_of`
///
/// A document with no history at all yields its current sections.
///
/// # Errors
///
/// `NotFound` for an unknown document; storage errors pass through.
pub fn reconstruct<S: LawSource + ?Sized>(
    source: &S,
    document_id: &DocumentId,
    as_of: NaiveDate,
) -> Result<LawVersionResult> {
    let current = source.get_current_sections(document_id)?;
    let log = SectionChangeLog::load(source, document_id)?;
    Ok(reconstruct_from(&log, &current, as_of))
}

/// Reconstruct from a loaded change log and current sections
pub fn reconstruct_from(
    log: &SectionChangeLog,
    current: &[Section],
    as_of: NaiveDate,
) -> LawVersionResult {
    let current_text: BTreeMap<&SectionKey, &str> =
        current.iter().map(|s| (&s.key, s.text.as_str())).collect();

    let keys: BTreeSet<&SectionKey> = current_text
        .keys()
        .copied()
        .chain(log.section_keys())
        .collect();

    let sections: Vec<SectionVersion> = keys
        .into_iter()
        .map(|key| resolve_section(log, key, current_text.get(key).copied(), as_of))
        .collect();

    let meta = VersionMeta {
        current_section_count: current_text.len(),
        historical_section_count: sections.iter().filter(|s| s.exists()).count(),
        sections_added_later: sections
            .iter()
            .filter(|s| !s.exists() && current_text.contains_key(&s.key))
            .count(),
        sections_text_unavailable: sections
            .iter()
            .filter(|s| s.exists() && s.text_unavailable)
            .count(),
    };

    tracing::debug!(
        document_id = %log.document_id(),
        as_of = %as_of,
        section_count = sections.len(),
        present = meta.historical_section_count,
        "reconstructed version"
    );

    LawVersionResult {
        document_id: log.document_id().clone(),
        as_of,
        sections,
        amendments_since: log
            .amendments_after(as_of)
            .iter()
            .map(AmendmentRef::from)
            .collect(),
        meta,
    }
}

fn resolve_section(
    log: &SectionChangeLog,
    key: &SectionKey,
    current_text: Option<&str>,
    as_of: NaiveDate,
) -> SectionVersion {
    let applied: Vec<AppliedAmendment> = log
        .changes_up_to(key, as_of)
        .iter()
        .map(AppliedAmendment::from)
        .collect();

    let Some(change) = log.latest_on_or_before(key, as_of) else {
        return resolve_before_history(log, key, current_text, applied);
    };

    if change.kind.is_repeal() {
        return not_exists(key, applied);
    }

    let source = SectionSource::Amendment {
        instrument_id: change.instrument_id.clone(),
    };
    let text = match &change.new_text {
        Some(text) => Some(text.clone()),
        // The current text is the state after the last change ever made
        None if is_latest_ever(log, key, change) => current_text.map(str::to_string),
        None => None,
    };

    SectionVersion {
        key: key.clone(),
        text_unavailable: text.is_none(),
        text,
        source,
        amendments_applied: applied,
    }
}

/// No change had taken effect by the date
fn resolve_before_history(
    log: &SectionChangeLog,
    key: &SectionKey,
    current_text: Option<&str>,
    applied: Vec<AppliedAmendment>,
) -> SectionVersion {
    if log
        .earliest(key)
        .is_some_and(|first| first.kind == ChangeKind::New)
    {
        return not_exists(key, applied);
    }

    SectionVersion {
        key: key.clone(),
        text: current_text.map(str::to_string),
        text_unavailable: current_text.is_none(),
        source: SectionSource::Current,
        amendments_applied: applied,
    }
}

fn is_latest_ever(log: &SectionChangeLog, key: &SectionKey, change: &SectionChange) -> bool {
    log.latest(key)
        .is_some_and(|last| last.chronology() == change.chronology() && last.amendment_id == change.amendment_id)
}

fn not_exists(key: &SectionKey, applied: Vec<AppliedAmendment>) -> SectionVersion {
    SectionVersion {
        key: key.clone(),
        text: None,
        text_unavailable: false,
        source: SectionSource::NotExists,
        amendments_applied: applied,
    }
}

/// Distinct amendment effective dates, newest first
///
/// # Errors
///
/// `NotFound` for an unknown document; storage errors pass through.
pub fn available_version_dates<S: LawSource + ?Sized>(
    source: &S,
    document_id: &DocumentId,
) -> Result<Vec<NaiveDate>> {
    let dates: BTreeSet<NaiveDate> = source
        .get_amendments(document_id)?
        .iter()
        .map(|a| a.effective_date)
        .collect();
    Ok(dates.into_iter().rev().collect())
}
