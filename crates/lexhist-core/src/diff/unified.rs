//! Line-level unified diff rendering.

use std::fmt::Write as _;

use crate::diff::myers::{self, Edit};
use crate::normalize::unify_line_endings;

const CONTEXT_LINES: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tag {
    Context,
    Removed,
    Added,
}

/// Render a unified patch from `text_a` to `text_b`
///
/// Line endings are unified and both texts trimmed first. Identical texts
/// yield an empty string.
pub fn unified_diff(text_a: &str, text_b: &str, label_a: &str, label_b: &str) -> String {
    let a = unify_line_endings(text_a);
    let b = unify_line_endings(text_b);
    let lines_a: Vec<&str> = split_lines(a.trim());
    let lines_b: Vec<&str> = split_lines(b.trim());

    let script: Vec<(Tag, &str)> = myers::diff(&lines_a, &lines_b)
        .into_iter()
        .map(|e| match e {
            Edit::Equal { a, .. } => (Tag::Context, lines_a[a]),
            Edit::Delete { a } => (Tag::Removed, lines_a[a]),
            Edit::Insert { b } => (Tag::Added, lines_b[b]),
        })
        .collect();

    let hunks = hunk_ranges(&script);
    if hunks.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "--- {}", label_a);
    let _ = writeln!(out, "+++ {}", label_b);

    for (start, end) in hunks {
        // 1-based line numbers at the hunk start on each side
        let a_before = script[..start].iter().filter(|(t, _)| *t != Tag::Added).count();
        let b_before = script[..start].iter().filter(|(t, _)| *t != Tag::Removed).count();
        let body = &script[start..end];
        let a_len = body.iter().filter(|(t, _)| *t != Tag::Added).count();
        let b_len = body.iter().filter(|(t, _)| *t != Tag::Removed).count();

        let _ = writeln!(
            out,
            "@@ -{} +{} @@",
            range_label(a_before, a_len),
            range_label(b_before, b_len)
        );
        for (tag, line) in body {
            let marker = match tag {
                Tag::Context => ' ',
                Tag::Removed => '-',
                Tag::Added => '+',
            };
            let _ = writeln!(out, "{}{}", marker, line);
        }
    }
    out
}

fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// `start,len` with the conventions of GNU diff for empty and single-line ranges
fn range_label(before: usize, len: usize) -> String {
    match len {
        0 => format!("{},0", before),
        1 => format!("{}", before + 1),
        _ => format!("{},{}", before + 1, len),
    }
}

/// Half-open script ranges for each hunk, merging changes whose context overlaps
fn hunk_ranges(script: &[(Tag, &str)]) -> Vec<(usize, usize)> {
    let mut hunks: Vec<(usize, usize)> = Vec::new();
    for (idx, (tag, _)) in script.iter().enumerate() {
        if *tag == Tag::Context {
            continue;
        }
        let start = idx.saturating_sub(CONTEXT_LINES);
        let end = (idx + 1 + CONTEXT_LINES).min(script.len());
        match hunks.last_mut() {
            Some(last) if start <= last.1 => last.1 = end,
            _ => hunks.push((start, end)),
        }
    }
    hunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_produce_empty_patch() {
        assert_eq!(unified_diff("a\nb", "a\r\nb\n", "a", "b"), "");
    }

    #[test]
    fn test_single_line_change() {
        let patch = unified_diff("ett\ntvå\ntre", "ett\nTVÅ\ntre", "2005-01-01", "2015-01-01");
        assert_eq!(
            patch,
            "--- 2005-01-01\n+++ 2015-01-01\n@@ -1,3 +1,3 @@\n ett\n-två\n+TVÅ\n tre\n"
        );
    }

    #[test]
    fn test_distant_changes_split_into_hunks() {
        let a: Vec<String> = (1..=20).map(|i| format!("rad {}", i)).collect();
        let mut b = a.clone();
        b[1] = "ändrad 2".to_string();
        b[18] = "ändrad 19".to_string();
        let patch = unified_diff(&a.join("\n"), &b.join("\n"), "a", "b");
        assert_eq!(patch.matches("@@ -").count(), 2);
        assert!(patch.contains("@@ -1,5 +1,5 @@"));
        assert!(patch.contains("@@ -16,5 +16,5 @@"));
    }

    #[test]
    fn test_added_text_from_empty() {
        let patch = unified_diff("", "ny rad", "a", "b");
        assert!(patch.contains("@@ -0,0 +1 @@"));
        assert!(patch.ends_with("+ny rad\n"));
    }

    #[test]
    fn test_rewritten_section_is_one_hunk() {
        let a: Vec<String> = (0..4000).map(|i| format!("före {}", i)).collect();
        let b: Vec<String> = (0..4000).map(|i| format!("efter {}", i)).collect();
        let patch = unified_diff(&a.join("\n"), &b.join("\n"), "a", "b");
        assert_eq!(patch.matches("@@ -").count(), 1);
        assert!(patch.contains("@@ -1,4000 +1,4000 @@"));
        assert_eq!(patch.lines().filter(|l| l.starts_with("-före")).count(), 4000);
        assert_eq!(patch.lines().filter(|l| l.starts_with("+efter")).count(), 4000);
    }
}

