//! Read-only persistence collaborator
//!
//! Reconstruction never writes. Everything it needs about a document comes
//! through [`LawSource`], implemented in-memory here and over SQLite in the
//! `lexhist-store` crate.

mod memory;

pub use memory::MemoryLawSource;

use crate::errors::Result;
use crate::model::{Amendment, DocumentId, LegalDocument, Section, SectionChange};

/// Read access to persisted documents, amendments and section changes
///
/// Every method fails with `NotFound` for an unknown document; a known
/// document with no amendments yields empty lists.
pub trait LawSource: Send + Sync {
    /// Document header (id and title) plus current sections
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown document, `Persistence` on storage failure.
    fn get_document(&self, id: &DocumentId) -> Result<LegalDocument>;

    /// Current canonical sections, in storage order
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown document, `Persistence` on storage failure.
    fn get_current_sections(&self, id: &DocumentId) -> Result<Vec<Section>>;

    /// Amendments ordered by effective date, then sequence
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown document, `Persistence` on storage failure.
    fn get_amendments(&self, id: &DocumentId) -> Result<Vec<Amendment>>;

    /// Section changes joined to their amendment's effective date
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown document, `Persistence` on storage failure.
    fn get_section_changes(&self, id: &DocumentId) -> Result<Vec<SectionChange>>;
}

impl<T: LawSource + ?Sized> LawSource for std::sync::Arc<T> {
    fn get_document(&self, id: &DocumentId) -> Result<LegalDocument> {
        (**self).get_document(id)
    }

    fn get_current_sections(&self, id: &DocumentId) -> Result<Vec<Section>> {
        (**self).get_current_sections(id)
    }

    fn get_amendments(&self, id: &DocumentId) -> Result<Vec<Amendment>> {
        (**self).get_amendments(id)
    }

    fn get_section_changes(&self, id: &DocumentId) -> Result<Vec<SectionChange>> {
        (**self).get_section_changes(id)
    }
}
