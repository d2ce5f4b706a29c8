//! Text normalization for semantic equality
//!
//! Normalized text is for comparison only and is never displayed. The rules
//! discard typographic noise that ingestion introduces between otherwise
//! identical provision texts: line-break hyphenation, soft hyphens,
//! paragraph-number markers, trailing amendment citations, whitespace and
//! quote variants.

use once_cell::sync::Lazy;
use regex::Regex;

/// `1 §`, `2 a §`, `12b§`
static SECTION_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+\s*[a-z]?\s*§\s*").unwrap_or_else(|e| panic!("invalid regex: {e}"))
});

/// `3 kap.`
static CHAPTER_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+\s*kap\.\s*").unwrap_or_else(|e| panic!("invalid regex: {e}"))
});

/// `. Lag (2010:123)` appended by consolidation to amended paragraphs
static AMENDED_BY_CITATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.?\s*(?:Lag|Förordning|Kungörelse)\s*\(\d{4}:\d+\)")
        .unwrap_or_else(|e| panic!("invalid regex: {e}"))
});

/// Bare instrument references, `SFS 2010:123`
static INSTRUMENT_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)SFS\s*\d{4}:\d+").unwrap_or_else(|e| panic!("invalid regex: {e}"))
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").unwrap_or_else(|e| panic!("invalid regex: {e}")));

const SOFT_HYPHEN: char = '\u{00AD}';

/// Canonicalize provision text for equality comparison
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)` for every input.
/// A single pass can expose a new match (removing a citation may leave two
/// whitespace runs adjacent), so the pass is repeated until the text stops
/// changing. Every rule deletes or canonicalizes characters, so the loop ends.
pub fn normalize(text: &str) -> String {
    let mut current = normalize_pass(text);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// True when two texts differ only in formatting noise
pub fn semantically_equal(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

// Soft hyphens and citations are stripped before hyphens are merged. Text
// that a later rule exposes to an earlier one is caught by the next pass of
// the fixpoint loop in `normalize`, so the rule order does not change the
// result.
fn normalize_pass(text: &str) -> String {
    let text = unify_line_endings(text);
    let text: String = text.chars().filter(|&c| c != SOFT_HYPHEN).collect();
    let text = AMENDED_BY_CITATION.replace_all(&text, "");
    let text = INSTRUMENT_REFERENCE.replace_all(&text, "");
    let text = CHAPTER_NUMBER.replace_all(&text, "");
    let text = SECTION_NUMBER.replace_all(&text, "");
    let text = text.replace('§', "");
    let text = merge_hyphenation(&text);
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = normalize_quotes(&text);
    text.trim().to_string()
}

/// `\r\n` and lone `\r` become `\n`
pub fn unify_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Drop a hyphen sitting between two lowercase letters, optionally across
/// a line break (`för-\nhandling`). Hyphens touching uppercase letters,
/// digits, spaces or punctuation are kept.
fn merge_hyphenation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '-' && prev.is_some_and(char::is_lowercase) {
            let next = skip_line_break(&chars, i + 1);
            if chars.get(next).is_some_and(|n| n.is_lowercase()) {
                i = next;
                continue;
            }
        }
        out.push(c);
        prev = Some(c);
        i += 1;
    }
    out
}

/// Index of the first char after `[ \t]*\n[ \t]*` starting at `from`, or
/// `from` itself when no line break follows
fn skip_line_break(chars: &[char], from: usize) -> usize {
    let is_blank = |c: &char| *c == ' ' || *c == '\t';
    let mut j = from;
    while chars.get(j).is_some_and(is_blank) {
        j += 1;
    }
    if chars.get(j) != Some(&'\n') {
        return from;
    }
    j += 1;
    while chars.get(j).is_some_and(is_blank) {
        j += 1;
    }
    j
}

fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{00AB}' | '\u{00BB}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' => '\'',
            other => other,
        })
        .collect()
}
