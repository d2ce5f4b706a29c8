//! Per-document, per-section chronological change log
//!
//! Changes for each section are stored sorted ascending by
//! (effective date, amendment sequence, sort order). "Latest change on or
//! before a date" is then a binary search instead of a rescan per query.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::errors::Result;
use crate::model::{Amendment, DocumentId, SectionChange, SectionKey};
use crate::source::LawSource;

/// Ordered amendment list plus ordered change list per section key
#[derive(Debug, Clone)]
pub struct SectionChangeLog {
    document_id: DocumentId,
    amendments: Vec<Amendment>,
    sections: BTreeMap<SectionKey, Vec<SectionChange>>,
}

impl SectionChangeLog {
    /// Read amendments and section changes for one document
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown document; storage errors pass through.
    pub fn load<S: LawSource + ?Sized>(source: &S, document_id: &DocumentId) -> Result<Self> {
        let amendments = source.get_amendments(document_id)?;
        let changes = source.get_section_changes(document_id)?;
        Ok(Self::from_parts(document_id.clone(), amendments, changes))
    }

    /// Build from already-loaded rows in any order
    pub fn from_parts(
        document_id: DocumentId,
        mut amendments: Vec<Amendment>,
        changes: Vec<SectionChange>,
    ) -> Self {
        amendments.sort_by_key(Amendment::chronology);

        let mut sections: BTreeMap<SectionKey, Vec<SectionChange>> = BTreeMap::new();
        for change in changes {
            sections.entry(change.key.clone()).or_default().push(change);
        }
        for list in sections.values_mut() {
            // Stable, so rows identical in chronology keep storage order
            list.sort_by_key(SectionChange::chronology);
        }

        Self {
            document_id,
            amendments,
            sections,
        }
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    /// All amendments, ascending by effective date then sequence
    pub fn amendments(&self) -> &[Amendment] {
        &self.amendments
    }

    /// Section keys with at least one change, in natural order
    pub fn section_keys(&self) -> impl Iterator<Item = &SectionKey> {
        self.sections.keys()
    }

    /// Changes for one section, ascending
    pub fn changes_for(&self, key: &SectionKey) -> &[SectionChange] {
        self.sections.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_history(&self, key: &SectionKey) -> bool {
        !self.changes_for(key).is_empty()
    }

    /// Latest change effective on or before `date`
    pub fn latest_on_or_before(&self, key: &SectionKey, date: NaiveDate) -> Option<&SectionChange> {
        let changes = self.changes_for(key);
        let idx = changes.partition_point(|c| c.effective_date <= date);
        idx.checked_sub(1).map(|i| &changes[i])
    }

    pub fn earliest(&self, key: &SectionKey) -> Option<&SectionChange> {
        self.changes_for(key).first()
    }

    pub fn latest(&self, key: &SectionKey) -> Option<&SectionChange> {
        self.changes_for(key).last()
    }

    /// Changes effective on or before `date`, ascending
    pub fn changes_up_to(&self, key: &SectionKey, date: NaiveDate) -> &[SectionChange] {
        let changes = self.changes_for(key);
        let end = changes.partition_point(|c| c.effective_date <= date);
        &changes[..end]
    }

    /// Changes with effective date in the half-open range `(after, up_to]`
    pub fn changes_between(
        &self,
        key: &SectionKey,
        after: NaiveDate,
        up_to: NaiveDate,
    ) -> &[SectionChange] {
        let changes = self.changes_for(key);
        let start = changes.partition_point(|c| c.effective_date <= after);
        let end = changes.partition_point(|c| c.effective_date <= up_to);
        if start >= end {
            return &[];
        }
        &changes[start..end]
    }

    /// Amendments effective strictly after `date`, ascending
    pub fn amendments_after(&self, date: NaiveDate) -> &[Amendment] {
        let start = self.amendments.partition_point(|a| a.effective_date <= date);
        &self.amendments[start..]
    }

    /// Amendments with effective date in `(after, up_to]`, ascending
    pub fn amendments_between(&self, after: NaiveDate, up_to: NaiveDate) -> &[Amendment] {
        let start = self.amendments.partition_point(|a| a.effective_date <= after);
        let end = self.amendments.partition_point(|a| a.effective_date <= up_to);
        if start >= end {
            return &[];
        }
        &self.amendments[start..end]
    }

    /// Every section's change list in natural key order
    pub fn iter(&self) -> impl Iterator<Item = (&SectionKey, &[SectionChange])> {
        self.sections.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// All changes made by one amendment, in sort order
    pub fn changes_by_amendment(&self, amendment_id: i64) -> Vec<&SectionChange> {
        let mut changes: Vec<&SectionChange> = self
            .sections
            .values()
            .flatten()
            .filter(|c| c.amendment_id == amendment_id)
            .collect();
        changes.sort_by_key(|c| c.sort_order);
        changes
    }
}
