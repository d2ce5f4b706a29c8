//! Core types shared across lexhist facilities
//!
//! This crate provides foundational types used by the error, logging and
//! cache facilities:
//!
//! - **Schema constants**: Canonical field keys and event names
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
