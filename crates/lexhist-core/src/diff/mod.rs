//! Version diff engine.
//!
//! Compares two reconstructions of the same document and produces a
//! structured, deterministic section-by-section diff.
//!
//! ## Entry point
//!
//! ```ignore
//! use lexhist_core::diff::diff_versions;
//!
//! let diff = diff_versions(&source, &doc, date_a, date_b)?;
//! let summary = lexhist_core::diff::render_human_summary(&diff);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: sections are ordered by natural section key regardless of storage order.
//! - **Noise suppression**: texts that are semantically equal are reported `unchanged`.
//! - **No false changes**: a section with no change in `(date_a, date_b]` is `unchanged`.
//! - **Text unavailable** is surfaced as `modified` with `text_unavailable`, never as unchanged.

pub mod engine;
pub mod human_summary;
pub mod model;
pub mod myers;
pub mod unified;

pub use engine::{changed_sections, diff_reconstructions, diff_versions, line_diff, validate_range};
pub use human_summary::render_human_summary;
pub use model::{DiffOp, DiffPart, DiffSummary, LawVersionDiff, SectionChangeType, SectionDiff};
pub use unified::unified_diff;
