//! lexhist core - point-in-time reconstruction and diffing of legal provisions
//!
//! This crate provides the domain model and pure algorithms for the
//! law-history subsystem:
//! - Document, section and amendment models with a closed change-type union
//! - Text normalization for semantic equality of provision text
//! - A per-section change log with binary-searched "latest change as of" lookups
//! - Version reconstruction of a whole document as of any date
//! - Structured section-by-section diffs between two reconstructions
//! - Section history and amendment timelines
//!
//! Persistence is abstracted behind [`source::LawSource`]; caching lives in
//! the `lexhist-cache` crate.

pub mod changelog;
pub mod diff;
pub mod errors;
pub mod history;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod reconstruct;
pub mod source;

// Used by the logging macros so callers need no direct dependency
pub use lexhist_core_types::schema;
pub use tracing;

// Re-export commonly used types
pub use changelog::SectionChangeLog;
pub use errors::{ExError, ExErrorKind, LawHistoryError, Result};
pub use model::{
    Amendment, ChangeKind, DocumentId, LegalDocument, Metadata, ParseStatus, Section,
    SectionChange, SectionKey,
};
pub use normalize::{normalize, semantically_equal};
pub use source::{LawSource, MemoryLawSource};
