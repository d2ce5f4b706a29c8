use parking_lot::RwLock;
use std::collections::HashMap;

use crate::errors::{LawHistoryError, Result};
use crate::model::{Amendment, DocumentId, LegalDocument, Section, SectionChange};
use crate::source::LawSource;

#[derive(Debug, Clone)]
struct StoredDocument {
    document: LegalDocument,
    amendments: Vec<Amendment>,
    changes: Vec<SectionChange>,
}

/// In-memory [`LawSource`]
///
/// Backs unit tests and embedding callers that already hold parsed data.
/// Interior mutability lets a test play the ingestion role (commit an
/// amendment, then fire invalidation) against a source shared with a service.
#[derive(Debug, Default)]
pub struct MemoryLawSource {
    documents: RwLock<HashMap<DocumentId, StoredDocument>>,
}

impl MemoryLawSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document with no history
    pub fn insert_document(&self, document: LegalDocument) {
        self.documents.write().insert(
            document.id.clone(),
            StoredDocument {
                document,
                amendments: Vec::new(),
                changes: Vec::new(),
            },
        );
    }

    /// Record an amendment with its section changes and apply them to the
    /// current text, the way ingestion overwrites sections on commit
    ///
    /// # Errors
    ///
    /// `NotFound` when the document has not been inserted.
    pub fn commit_amendment(&self, amendment: Amendment, changes: Vec<SectionChange>) -> Result<()> {
        let mut documents = self.documents.write();
        let stored = documents.get_mut(&amendment.document_id).ok_or_else(|| {
            LawHistoryError::DocumentNotFound {
                document_id: amendment.document_id.to_string(),
            }
        })?;

        for change in &changes {
            let position = stored
                .document
                .sections
                .iter()
                .position(|s| s.key == change.key);
            match (change.kind.is_repeal(), position) {
                (true, Some(idx)) => {
                    stored.document.sections.remove(idx);
                }
                (true, None) => {}
                (false, Some(idx)) => {
                    if let Some(text) = &change.new_text {
                        stored.document.sections[idx].text = text.clone();
                    }
                }
                (false, None) => {
                    let text = change.new_text.clone().unwrap_or_default();
                    stored
                        .document
                        .sections
                        .push(Section::new(change.key.clone(), text));
                }
            }
        }

        stored.amendments.push(amendment);
        stored.amendments.sort_by_key(Amendment::chronology);
        stored.changes.extend(changes);
        Ok(())
    }

    /// Record history without touching current text
    ///
    /// For fixtures whose current text is already the post-amendment state.
    ///
    /// # Errors
    ///
    /// `NotFound` when the document has not been inserted.
    pub fn record_history(&self, amendment: Amendment, changes: Vec<SectionChange>) -> Result<()> {
        let mut documents = self.documents.write();
        let stored = documents.get_mut(&amendment.document_id).ok_or_else(|| {
            LawHistoryError::DocumentNotFound {
                document_id: amendment.document_id.to_string(),
            }
        })?;
        stored.amendments.push(amendment);
        stored.amendments.sort_by_key(Amendment::chronology);
        stored.changes.extend(changes);
        Ok(())
    }

    fn with_document<T>(&self, id: &DocumentId, f: impl FnOnce(&StoredDocument) -> T) -> Result<T> {
        let documents = self.documents.read();
        let stored = documents
            .get(id)
            .ok_or_else(|| LawHistoryError::DocumentNotFound {
                document_id: id.to_string(),
            })?;
        Ok(f(stored))
    }
}

impl LawSource for MemoryLawSource {
    fn get_document(&self, id: &DocumentId) -> Result<LegalDocument> {
        self.with_document(id, |s| s.document.clone())
    }

    fn get_current_sections(&self, id: &DocumentId) -> Result<Vec<Section>> {
        self.with_document(id, |s| s.document.sections.clone())
    }

    fn get_amendments(&self, id: &DocumentId) -> Result<Vec<Amendment>> {
        self.with_document(id, |s| s.amendments.clone())
    }

    fn get_section_changes(&self, id: &DocumentId) -> Result<Vec<SectionChange>> {
        self.with_document(id, |s| s.changes.clone())
    }
}
