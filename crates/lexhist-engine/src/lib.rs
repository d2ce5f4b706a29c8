//! lexhist engine - the service facade callers talk to
//!
//! Wires the pure reconstruction and diff algorithms from `lexhist-core`
//! to the tiered caches from `lexhist-cache`, owns operation boundary
//! logging, and exposes the invalidation hook the ingestion pipeline
//! calls after every commit.

pub mod invalidation;
pub mod prewarm;
pub mod service;

pub use invalidation::{CacheInvalidator, IngestionEvent};
pub use prewarm::PrewarmReport;
pub use service::LawVersionService;
