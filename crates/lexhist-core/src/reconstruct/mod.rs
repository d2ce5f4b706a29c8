//! Point-in-time reconstruction of a document's section set.
//!
//! A version is derived from the current canonical sections plus the
//! per-section change log; no per-date snapshot is ever stored.
//!
//! ## Resolution rules, per section key
//!
//! - Latest change on or before the date is a repeal: the section does not exist.
//! - Latest change on or before the date carries text: that text.
//! - Latest change carries no text: text unavailable, unless it is the
//!   section's last change ever, in which case the current text is that state.
//! - No change on or before the date: not yet introduced if the first change
//!   is `NEW`, otherwise the current text ("unchanged since enactment").

pub mod engine;
pub mod model;

pub use engine::{available_version_dates, reconstruct, reconstruct_from};
pub use model::{
    AmendmentRef, AppliedAmendment, LawVersionResult, SectionSource, SectionVersion, VersionMeta,
};
