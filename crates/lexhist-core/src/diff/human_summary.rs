//! Human-readable summary renderer for version diffs.

use crate::diff::model::{LawVersionDiff, SectionChangeType, SectionDiff};

/// Render a Markdown summary of a [`LawVersionDiff`].
///
/// Informational only; the structured diff is authoritative.
pub fn render_human_summary(diff: &LawVersionDiff) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "## {}: {} → {}\n\n",
        diff.document_id, diff.date_a, diff.date_b
    ));

    let s = &diff.summary;
    out.push_str(&format!(
        "| Added | Removed | Modified | Unchanged | Lines + | Lines − |\n\
         |---|---|---|---|---|---|\n\
         | {} | {} | {} | {} | {} | {} |\n\n",
        s.sections_added,
        s.sections_removed,
        s.sections_modified,
        s.sections_unchanged,
        s.total_lines_added,
        s.total_lines_removed,
    ));

    if !s.has_changes() {
        out.push_str("_No changes between these dates._\n");
        return out;
    }

    for (heading, change_type) in [
        ("Added sections", SectionChangeType::Added),
        ("Removed sections", SectionChangeType::Removed),
        ("Modified sections", SectionChangeType::Modified),
    ] {
        let matching: Vec<&SectionDiff> = diff
            .sections
            .iter()
            .filter(|sd| sd.change_type == change_type)
            .collect();
        if matching.is_empty() {
            continue;
        }
        out.push_str(&format!("### {}\n\n", heading));
        for section in matching {
            out.push_str(&format!("- {}", section.key));
            if section.text_unavailable {
                out.push_str(" (text unavailable)");
            } else if change_type == SectionChangeType::Modified {
                out.push_str(&format!(
                    " (+{} / −{} lines)",
                    section.lines_added, section.lines_removed
                ));
            }
            let instruments: Vec<&str> = section
                .amendments_between
                .iter()
                .map(|a| a.instrument_id.as_str())
                .collect();
            if !instruments.is_empty() {
                out.push_str(&format!(" via {}", instruments.join(", ")));
            }
            out.push('\n');
        }
        out.push('\n');
    }

    if !diff.amendments_between.is_empty() {
        out.push_str("### Amendments in range\n\n");
        for amendment in &diff.amendments_between {
            match &amendment.title {
                Some(title) => out.push_str(&format!(
                    "- {} `{}` {}\n",
                    amendment.effective_date, amendment.instrument_id, title
                )),
                None => out.push_str(&format!(
                    "- {} `{}`\n",
                    amendment.effective_date, amendment.instrument_id
                )),
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::DiffSummary;
    use crate::model::{DocumentId, SectionKey};
    use chrono::NaiveDate;

    fn empty_diff() -> LawVersionDiff {
        LawVersionDiff {
            document_id: DocumentId::new("1977:1160"),
            date_a: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            date_b: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            sections: vec![],
            summary: DiffSummary::default(),
            amendments_between: vec![],
        }
    }

    #[test]
    fn test_no_changes_message() {
        let rendered = render_human_summary(&empty_diff());
        assert!(rendered.starts_with("## 1977:1160: 2010-01-01 → 2010-01-01"));
        assert!(rendered.contains("_No changes between these dates._"));
    }

    #[test]
    fn test_lists_modified_sections_with_counts() {
        let mut diff = empty_diff();
        diff.summary.sections_modified = 1;
        diff.sections.push(SectionDiff {
            key: SectionKey::in_chapter("1", "1"),
            change_type: SectionChangeType::Modified,
            line_diff: vec![],
            lines_added: 2,
            lines_removed: 1,
            text_unavailable: false,
            text_a: None,
            text_b: None,
            amendments_between: vec![],
        });
        let rendered = render_human_summary(&diff);
        assert!(rendered.contains("### Modified sections"));
        assert!(rendered.contains("- 1 kap. 1 § (+2 / −1 lines)"));
        assert!(!rendered.contains("### Added sections"));
    }
}
