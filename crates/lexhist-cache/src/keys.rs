//! Stable cache key scheme shared by every tier and every process
//!
//! `law-version:{doc}:{YYYY-MM-DD}`, `law-diff:{doc}:{A}:{B}`,
//! `law-timeline:{doc}:all`. Invalidation of one document deletes the
//! `{kind}:{doc}:` prefix, which cannot match another document's keys.

use chrono::NaiveDate;
use lexhist_core::DocumentId;

use crate::config::CacheKind;

pub fn version_key(document_id: &DocumentId, as_of: NaiveDate) -> String {
    format!("{}{}", document_prefix(CacheKind::Version, document_id), as_of)
}

pub fn diff_key(document_id: &DocumentId, date_a: NaiveDate, date_b: NaiveDate) -> String {
    format!(
        "{}{}:{}",
        document_prefix(CacheKind::Diff, document_id),
        date_a,
        date_b
    )
}

pub fn timeline_key(document_id: &DocumentId) -> String {
    format!("{}all", document_prefix(CacheKind::Timeline, document_id))
}

/// Prefix covering every key of one kind for one document
pub fn document_prefix(kind: CacheKind, document_id: &DocumentId) -> String {
    format!("{}:{}:", kind.prefix(), document_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_key_formats() {
        let doc = DocumentId::new("SFS 1977:1160");
        assert_eq!(version_key(&doc, date("2005-01-01")), "law-version:1977:1160:2005-01-01");
        assert_eq!(
            diff_key(&doc, date("2005-01-01"), date("2015-01-01")),
            "law-diff:1977:1160:2005-01-01:2015-01-01"
        );
        assert_eq!(timeline_key(&doc), "law-timeline:1977:1160:all");
    }

    #[test]
    fn test_prefix_does_not_match_longer_document_id() {
        let short = DocumentId::new("1977:11");
        let long = DocumentId::new("1977:1160");
        let key = version_key(&long, date("2005-01-01"));
        assert!(!key.starts_with(&document_prefix(CacheKind::Version, &short)));
        assert!(key.starts_with(&document_prefix(CacheKind::Version, &long)));
    }
}
