use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::errors::{ExError, ExErrorKind, LawHistoryError};

/// Stable external key of a legal document (statute number, e.g. `1977:1160`)
///
/// Construction trims whitespace and strips an optional leading `SFS `
/// prefix so that `"SFS 1977:1160"` and `"1977:1160"` name the same law.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        let bare = trimmed
            .strip_prefix("SFS ")
            .or_else(|| trimmed.strip_prefix("sfs "))
            .unwrap_or(trimmed);
        Self(bare.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = DocumentId::new(s);
        if id.0.is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_document_id")
                .with_message("document id must not be empty"));
        }
        Ok(id)
    }
}

impl From<&str> for DocumentId {
    fn from(raw: &str) -> Self {
        DocumentId::new(raw)
    }
}

/// Identity of a section within a document: optional chapter plus section number
///
/// Ordering is natural rather than lexicographic: chapter-less keys first,
/// then by numeric chapter, then numeric section, then letter suffix, so
/// `2 § < 2 a § < 10 §`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionKey {
    pub chapter: Option<String>,
    pub section: String,
}

impl SectionKey {
    /// Validate and build a key from raw parts
    ///
    /// # Errors
    ///
    /// `InvalidSectionKey` when the section number is blank.
    pub fn try_new(chapter: Option<&str>, section: &str) -> Result<Self, LawHistoryError> {
        let section = section.trim();
        if section.is_empty() {
            return Err(LawHistoryError::InvalidSectionKey {
                reason: "section number must not be empty".to_string(),
            });
        }
        let chapter = chapter
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Ok(Self {
            chapter,
            section: section.to_string(),
        })
    }

    /// Key for a section inside a numbered chapter
    pub fn in_chapter(chapter: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            chapter: Some(chapter.into()),
            section: section.into(),
        }
    }

    /// Key for a section of an unchaptered document
    pub fn top_level(section: impl Into<String>) -> Self {
        Self {
            chapter: None,
            section: section.into(),
        }
    }
}

/// Split "12 a" / "12a" into (12, "a"); non-numeric labels sort after numbers
fn natural_parts(label: &str) -> (u64, String) {
    let label = label.trim();
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    let rest = label[digits.len()..].trim().to_lowercase();
    match digits.parse::<u64>() {
        Ok(n) => (n, rest),
        Err(_) => (u64::MAX, rest),
    }
}

impl Ord for SectionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let chapter_order = match (&self.chapter, &other.chapter) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => natural_parts(a).cmp(&natural_parts(b)),
        };
        chapter_order
            .then_with(|| natural_parts(&self.section).cmp(&natural_parts(&other.section)))
            .then_with(|| self.chapter.cmp(&other.chapter))
            .then_with(|| self.section.cmp(&other.section))
    }
}

impl PartialOrd for SectionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.chapter {
            Some(chapter) => write!(f, "{} kap. {} §", chapter, self.section),
            None => write!(f, "{} §", self.section),
        }
    }
}

/// Current canonical text of one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub key: SectionKey,
    pub text: String,
}

impl Section {
    pub fn new(key: SectionKey, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }
}

/// A legal document as last ingested: its key, title and current sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalDocument {
    pub id: DocumentId,
    pub title: String,
    pub sections: Vec<Section>,
}

impl LegalDocument {
    pub fn new(id: DocumentId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, key: SectionKey, text: impl Into<String>) -> Self {
        self.sections.push(Section::new(key, text));
        self
    }
}
