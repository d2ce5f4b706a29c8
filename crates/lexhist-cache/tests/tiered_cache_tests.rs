mod common;

use common::{date, doc_id, small_source};
use lexhist_cache::keys::{diff_key, document_prefix, version_key};
use lexhist_cache::{CacheConfig, CacheKind, InMemorySharedBackend, SharedCacheBackend, TieredCache};
use lexhist_core::diff::{diff_versions, LawVersionDiff};
use lexhist_core::reconstruct::{reconstruct, LawVersionResult};
use std::sync::Arc;

fn shared_backend() -> Arc<InMemorySharedBackend> {
    Arc::new(InMemorySharedBackend::new())
}

#[test]
fn test_version_survives_shared_tier_round_trip() {
    let source = small_source();
    let backend = shared_backend();
    let config = CacheConfig::default();
    let key = version_key(&doc_id(), date("2016-01-01"));

    let writer: TieredCache<LawVersionResult> = TieredCache::from_config(
        CacheKind::Version,
        &config,
        Some(backend.clone() as Arc<dyn SharedCacheBackend>),
    );
    let computed = writer
        .get_or_compute(&key, || reconstruct(&source, &doc_id(), date("2016-01-01")))
        .unwrap();

    let reader: TieredCache<LawVersionResult> =
        TieredCache::from_config(
        CacheKind::Version,
        &config,
        Some(backend as Arc<dyn SharedCacheBackend>),
    );
    let fetched = reader
        .get_or_compute(&key, || panic!("shared tier should answer"))
        .unwrap();

    assert_eq!(*computed, *fetched);
    assert_eq!(fetched.text_of(&lexhist_core::SectionKey::top_level("1")), Some("Ändrad lydelse."));
    assert_eq!(reader.stats().l1.misses, 1);
    assert_eq!(reader.stats().l2.hits, 1);
}

#[test]
fn test_document_prefix_invalidates_every_date() {
    let source = small_source();
    let cache: TieredCache<LawVersionResult> =
        TieredCache::from_config(CacheKind::Version, &CacheConfig::default(), None);
    for day in ["2014-01-01", "2016-01-01", "2019-01-01"] {
        cache
            .get_or_compute(&version_key(&doc_id(), date(day)), || {
                reconstruct(&source, &doc_id(), date(day))
            })
            .unwrap();
    }

    let removed = cache.invalidate_prefix(&document_prefix(CacheKind::Version, &doc_id()));
    assert_eq!(removed, 3);
}

#[test]
fn test_diff_cached_under_date_pair() {
    let source = small_source();
    let cache: TieredCache<LawVersionDiff> =
        TieredCache::from_config(
        CacheKind::Diff,
        &CacheConfig::default(),
        Some(shared_backend() as Arc<dyn SharedCacheBackend>),
    );
    let key = diff_key(&doc_id(), date("2014-01-01"), date("2019-01-01"));

    let diff = cache
        .get_or_compute(&key, || {
            diff_versions(&source, &doc_id(), date("2014-01-01"), date("2019-01-01"))
        })
        .unwrap();
    // 1 § has no recorded text before 2015, so both sides carry the current text
    assert_eq!(diff.summary.sections_added, 1);
    assert_eq!(diff.summary.sections_unchanged, 1);

    let again = cache
        .get_or_compute(&key, || panic!("must be cached"))
        .unwrap();
    assert!(Arc::ptr_eq(&diff, &again));
}

#[test]
fn test_unavailable_shared_tier_is_transparent() {
    let source = small_source();
    let backend = shared_backend();
    backend.set_available(false);
    let cache: TieredCache<LawVersionResult> = TieredCache::from_config(
        CacheKind::Version,
        &CacheConfig::default(),
        Some(backend.clone() as Arc<dyn SharedCacheBackend>),
    );
    let key = version_key(&doc_id(), date("2019-01-01"));

    let result = cache
        .get_or_compute(&key, || reconstruct(&source, &doc_id(), date("2019-01-01")))
        .unwrap();
    assert_eq!(result.present_sections().count(), 2);
    assert!(backend.is_empty());
}
