#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{consistent_source, date, doc_id, scenario_source};
use lexhist_core::diff::{
    changed_sections, diff_versions, render_human_summary, unified_diff, DiffOp, SectionChangeType,
};
use lexhist_core::errors::ExErrorKind;
use lexhist_core::{DocumentId, SectionKey};

#[test]
fn test_scenario_diff_classifies_each_section() {
    let source = scenario_source();
    let diff = diff_versions(&source, &doc_id(), date("2005-01-01"), date("2015-01-01")).unwrap();

    let by_key = |chapter: &str, section: &str| {
        let key = SectionKey::in_chapter(chapter, section);
        diff.sections.iter().find(|s| s.key == key).cloned()
    };

    let amended = by_key("1", "1").unwrap();
    assert_eq!(amended.change_type, SectionChangeType::Modified);
    assert!(amended.lines_added > 0);
    assert!(amended.lines_removed > 0);
    assert_eq!(amended.text_a.as_deref(), Some("X v1"));
    assert_eq!(amended.text_b.as_deref(), Some("X v2"));
    assert!(amended.line_diff.iter().any(|p| p.op == DiffOp::Removed && p.value == "v1"));

    assert_eq!(by_key("1", "2").unwrap().change_type, SectionChangeType::Unchanged);
    assert_eq!(by_key("1", "3").unwrap().change_type, SectionChangeType::Added);

    let unavailable = by_key("1", "4").unwrap();
    assert_eq!(unavailable.change_type, SectionChangeType::Modified);
    assert!(unavailable.text_unavailable);
    assert_eq!((unavailable.lines_added, unavailable.lines_removed), (0, 0));

    // Absent on both dates
    assert!(by_key("2", "5").is_none());

    assert_eq!(diff.summary.sections_added, 1);
    assert_eq!(diff.summary.sections_modified, 2);
    assert_eq!(diff.summary.sections_unchanged, 1);
    assert_eq!(diff.summary.sections_removed, 0);

    let between: Vec<&str> = diff
        .amendments_between
        .iter()
        .map(|a| a.instrument_id.as_str())
        .collect();
    assert_eq!(between, vec!["SFS 2007:3", "SFS 2009:2", "SFS 2011:9"]);
}

#[test]
fn test_same_date_diff_has_no_changes() {
    let source = scenario_source();
    for d in ["1990-01-01", "2005-01-01", "2009-06-30", "2020-06-01", "2030-01-01"] {
        let diff = diff_versions(&source, &doc_id(), date(d), date(d)).unwrap();
        assert_eq!(diff.summary.sections_added, 0, "added at {}", d);
        assert_eq!(diff.summary.sections_removed, 0, "removed at {}", d);
        assert_eq!(diff.summary.sections_modified, 0, "modified at {}", d);
        assert!(diff.amendments_between.is_empty());
    }
}

#[test]
fn test_sections_without_changes_in_range_are_unchanged() {
    let source = scenario_source();
    let dates = ["1995-01-01", "2004-01-01", "2009-01-01", "2013-01-01", "2021-01-01"];
    for (i, a) in dates.iter().enumerate() {
        for b in &dates[i..] {
            let diff = diff_versions(&source, &doc_id(), date(a), date(b)).unwrap();
            for section in diff.sections.iter().filter(|s| s.amendments_between.is_empty()) {
                assert_eq!(
                    section.change_type,
                    SectionChangeType::Unchanged,
                    "{} changed between {} and {}",
                    section.key,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_formatting_only_amendment_is_unchanged() {
    let source = consistent_source();
    let doc = DocumentId::new("2018:218");
    let diff = diff_versions(&source, &doc, date("2020-01-01"), date("2022-01-01")).unwrap();

    let first = diff
        .sections
        .iter()
        .find(|s| s.key == SectionKey::top_level("1"))
        .unwrap();
    assert_eq!(first.change_type, SectionChangeType::Unchanged);
    assert_eq!(first.amendments_between.len(), 1);

    let repealed = diff
        .sections
        .iter()
        .find(|s| s.key == SectionKey::top_level("10"))
        .unwrap();
    assert_eq!(repealed.change_type, SectionChangeType::Removed);
    assert_eq!(repealed.lines_removed, 1);

    let changed: Vec<String> = changed_sections(&diff)
        .iter()
        .map(|s| s.key.to_string())
        .collect();
    assert_eq!(changed, vec!["10 §"]);
}

#[test]
fn test_inverted_range_fails_fast() {
    let source = scenario_source();
    let err = diff_versions(&source, &doc_id(), date("2015-01-01"), date("2005-01-01")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidDateRange);
    assert!(err.kind().is_client_error());
}

#[test]
fn test_inverted_range_checked_before_lookup() {
    let source = scenario_source();
    let err = diff_versions(
        &source,
        &DocumentId::new("1900:1"),
        date("2015-01-01"),
        date("2005-01-01"),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidDateRange);
}

#[test]
fn test_unified_diff_and_summary_render_section_change() {
    let source = scenario_source();
    let diff = diff_versions(&source, &doc_id(), date("2005-01-01"), date("2015-01-01")).unwrap();
    let section = &changed_sections(&diff)[0];

    let patch = unified_diff(
        section.text_a.as_deref().unwrap(),
        section.text_b.as_deref().unwrap(),
        "2005-01-01",
        "2015-01-01",
    );
    assert!(patch.contains("-X v1\n"));
    assert!(patch.contains("+X v2\n"));

    let summary = render_human_summary(&diff);
    assert!(summary.contains("### Added sections"));
    assert!(summary.contains("1 kap. 4 § (text unavailable)"));
    assert!(summary.contains("`SFS 2009:2`"));
}
