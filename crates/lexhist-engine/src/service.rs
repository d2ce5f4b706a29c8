//! Cached query surface over a [`LawSource`].
//!
//! ## Logging Ownership
//!
//! The service owns lifecycle logging for every public operation:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Core and cache layers only emit `debug!`/`warn!` for internal details.

use chrono::NaiveDate;
use lexhist_cache::keys::{diff_key, document_prefix, timeline_key, version_key};
use lexhist_cache::{
    BreakerBackend, CacheConfig, CacheKind, CacheStats, RedisBackend, SharedCacheBackend,
    TieredCache,
};
use lexhist_core::diff::{diff_versions, validate_range, LawVersionDiff};
use lexhist_core::history::{amendment_timeline, section_history, HistoryEntry, TimelineEntry};
use lexhist_core::reconstruct::{available_version_dates, reconstruct, LawVersionResult};
use lexhist_core::{log_op_end, log_op_error, log_op_start};
use lexhist_core::{DocumentId, LawSource, Result, SectionKey};
use std::sync::Arc;
use std::time::Instant;

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Point-in-time law queries with two-tier memoization
///
/// Holds its caches explicitly; two services never share L1 state, and
/// they share L2 state only when handed the same backend.
pub struct LawVersionService<S> {
    source: S,
    versions: TieredCache<LawVersionResult>,
    diffs: TieredCache<LawVersionDiff>,
    timelines: TieredCache<Vec<TimelineEntry>>,
}

impl<S: LawSource> LawVersionService<S> {
    /// Build the caches from `config`
    ///
    /// A configured shared tier whose URL cannot be parsed is logged and
    /// skipped; the service then runs L1-only. A reachable tier that starts
    /// failing is skipped for `failure_cool_down` after each failure.
    pub fn new(source: S, config: CacheConfig) -> Self {
        let shared = config.shared.as_ref().and_then(|shared| {
            match RedisBackend::new(shared) {
                Ok(backend) => Some(Arc::new(BreakerBackend::new(
                    Arc::new(backend),
                    shared.failure_cool_down,
                )) as Arc<dyn SharedCacheBackend>),
                Err(err) => {
                    tracing::warn!(
                        component = module_path!(),
                        err_code = err.code(),
                        error = %err,
                        "Shared cache disabled"
                    );
                    None
                }
            }
        });
        Self::build(source, &config, shared)
    }

    /// Use `backend` as the L2 tier instead of connecting from `config`
    pub fn with_shared_backend(
        source: S,
        config: CacheConfig,
        backend: Arc<dyn SharedCacheBackend>,
    ) -> Self {
        Self::build(source, &config, Some(backend))
    }

    fn build(source: S, config: &CacheConfig, shared: Option<Arc<dyn SharedCacheBackend>>) -> Self {
        Self {
            source,
            versions: TieredCache::from_config(CacheKind::Version, config, shared.clone()),
            diffs: TieredCache::from_config(CacheKind::Diff, config, shared.clone()),
            timelines: TieredCache::from_config(CacheKind::Timeline, config, shared),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The document as it read on `as_of`
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown document; storage errors pass through.
    pub fn reconstruct(
        &self,
        document_id: &DocumentId,
        as_of: NaiveDate,
    ) -> Result<Arc<LawVersionResult>> {
        log_op_start!("reconstruct", document_id = %document_id, as_of = %as_of);
        let start = Instant::now();

        let result = self
            .versions
            .get_or_compute(&version_key(document_id, as_of), || {
                reconstruct(&self.source, document_id, as_of)
            })
            .map_err(|e| {
                log_op_error!("reconstruct", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "reconstruct",
            duration_ms = elapsed_ms(start),
            section_count = result.meta.historical_section_count
        );
        Ok(result)
    }

    /// Section-by-section diff between two dates
    ///
    /// The range is validated before any cache or store access.
    ///
    /// # Errors
    ///
    /// `InvalidDateRange` when `date_a > date_b`, `NotFound` for an unknown
    /// document; storage errors pass through.
    pub fn diff_versions(
        &self,
        document_id: &DocumentId,
        date_a: NaiveDate,
        date_b: NaiveDate,
    ) -> Result<Arc<LawVersionDiff>> {
        log_op_start!(
            "diff_versions",
            document_id = %document_id,
            date_a = %date_a,
            date_b = %date_b
        );
        let start = Instant::now();

        let result = validate_range(date_a, date_b)
            .and_then(|()| {
                self.diffs
                    .get_or_compute(&diff_key(document_id, date_a, date_b), || {
                        diff_versions(&self.source, document_id, date_a, date_b)
                    })
            })
            .map_err(|e| {
                log_op_error!("diff_versions", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "diff_versions",
            duration_ms = elapsed_ms(start),
            section_count = result.sections.len(),
            amendment_count = result.amendments_between.len()
        );
        Ok(result)
    }

    /// Every recorded state of one section, newest first
    ///
    /// Not cached: a single section's history is one indexed read.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown document or a section with no text and no
    /// history; storage errors pass through.
    pub fn section_history(
        &self,
        document_id: &DocumentId,
        key: &SectionKey,
    ) -> Result<Vec<HistoryEntry>> {
        log_op_start!("section_history", document_id = %document_id, section = %key);
        let start = Instant::now();

        let entries = section_history(&self.source, document_id, key).map_err(|e| {
            log_op_error!("section_history", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!(
            "section_history",
            duration_ms = elapsed_ms(start),
            entry_count = entries.len()
        );
        Ok(entries)
    }

    /// Amendments to a document, newest first, with per-type change counts
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown document; storage errors pass through.
    pub fn amendment_timeline(&self, document_id: &DocumentId) -> Result<Arc<Vec<TimelineEntry>>> {
        log_op_start!("amendment_timeline", document_id = %document_id);
        let start = Instant::now();

        let timeline = self
            .timelines
            .get_or_compute(&timeline_key(document_id), || {
                amendment_timeline(&self.source, document_id)
            })
            .map_err(|e| {
                log_op_error!("amendment_timeline", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "amendment_timeline",
            duration_ms = elapsed_ms(start),
            amendment_count = timeline.len()
        );
        Ok(timeline)
    }

    /// Dates on which the document changed, newest first
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown document; storage errors pass through.
    pub fn available_version_dates(&self, document_id: &DocumentId) -> Result<Vec<NaiveDate>> {
        log_op_start!("available_version_dates", document_id = %document_id);
        let start = Instant::now();

        let dates = available_version_dates(&self.source, document_id).map_err(|e| {
            log_op_error!(
                "available_version_dates",
                e.clone(),
                duration_ms = elapsed_ms(start)
            );
            e
        })?;

        log_op_end!(
            "available_version_dates",
            duration_ms = elapsed_ms(start),
            amendment_count = dates.len()
        );
        Ok(dates)
    }

    pub fn cache_stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();
        stats.set_kind(CacheKind::Version, self.versions.stats());
        stats.set_kind(CacheKind::Diff, self.diffs.stats());
        stats.set_kind(CacheKind::Timeline, self.timelines.stats());
        stats
    }

    pub fn reset_cache_stats(&self) {
        self.versions.reset_stats();
        self.diffs.reset_stats();
        self.timelines.reset_stats();
    }

    /// Drop every cached result for one document in every tier
    ///
    /// Returns the number of entries removed across kinds and tiers.
    pub fn invalidate(&self, document_id: &DocumentId) -> usize {
        let removed = self
            .versions
            .invalidate_prefix(&document_prefix(CacheKind::Version, document_id))
            + self
                .diffs
                .invalidate_prefix(&document_prefix(CacheKind::Diff, document_id))
            + self
                .timelines
                .invalidate_prefix(&document_prefix(CacheKind::Timeline, document_id));
        tracing::info!(
            component = module_path!(),
            op = "invalidate",
            document_id = %document_id,
            removed,
            "Invalidated document cache"
        );
        removed
    }

    /// Drop every cached result of every kind
    pub fn invalidate_all(&self) {
        self.versions.clear();
        self.diffs.clear();
        self.timelines.clear();
        tracing::info!(
            component = module_path!(),
            op = "invalidate_all",
            "Invalidated all caches"
        );
    }
}
