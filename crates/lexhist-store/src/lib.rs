//! lexhist store - read-only SQLite persistence for the law-history subsystem
//!
//! Provides:
//! - SQLite schema for documents, sections, amendments and section changes
//! - Migration runner with checksums and idempotent application
//! - Read-only queries joined the way reconstruction consumes them
//! - [`SqliteLawSource`], the [`lexhist_core::LawSource`] implementation

pub mod db;
pub mod errors;
pub mod migrations;
pub mod queries;
pub mod source;

// Re-export key types
pub use errors::Result;
pub use source::SqliteLawSource;
