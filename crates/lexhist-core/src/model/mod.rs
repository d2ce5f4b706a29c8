pub mod amendment;
pub mod document;
pub mod metadata;

pub use amendment::{Amendment, ChangeKind, ParseStatus, SectionChange};
pub use document::{DocumentId, LegalDocument, Section, SectionKey};
pub use metadata::Metadata;
