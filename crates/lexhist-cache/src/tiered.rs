//! Ordered provider list with back-fill and single-flight computation
//!
//! Lookup walks the providers in order (L1 then L2). A hit in a later tier
//! is written back into every earlier one. A miss everywhere runs the
//! computation once per key, however many callers are waiting, and the
//! result is written to every tier. Computation errors are handed to all
//! waiters and never cached.
//!
//! Invalidation bumps a generation counter. A value computed or read under
//! an older generation is still returned to its callers but never written
//! back, so `invalidate_prefix` cannot be undone by a computation that was
//! already running.

use lexhist_core::{ExError, ExErrorKind, Result};
use parking_lot::{Condvar, Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::{CacheConfig, CacheKind};
use crate::lru_tier::LruTier;
use crate::provider::{CacheProvider, Tier};
use crate::shared::{SharedCacheBackend, SharedTier};
use crate::stats::{KindCounters, KindStats};

struct Flight<V> {
    result: Mutex<Option<Result<Arc<V>>>>,
    done: Condvar,
}

impl<V> Flight<V> {
    fn new() -> Self {
        Self {
            result: Mutex::new(None),
            done: Condvar::new(),
        }
    }

    fn wait(&self) -> Result<Arc<V>> {
        let mut slot = self.result.lock();
        loop {
            if let Some(result) = slot.as_ref() {
                return result.clone();
            }
            self.done.wait(&mut slot);
        }
    }

    fn finish(&self, result: Result<Arc<V>>) {
        *self.result.lock() = Some(result);
        self.done.notify_all();
    }
}

/// Leader side of a flight; wakes waiters with an error if the
/// computation unwinds before finishing.
struct FlightGuard<'a, V> {
    cache: &'a TieredCache<V>,
    key: &'a str,
    flight: Arc<Flight<V>>,
    finished: bool,
}

impl<V> FlightGuard<'_, V> {
    fn finish(mut self, result: Result<Arc<V>>) {
        self.flight.finish(result);
        self.leave();
        self.finished = true;
    }

    /// Unregister this flight unless invalidation already replaced it
    fn leave(&self) {
        let mut inflight = self.cache.inflight.lock();
        if inflight
            .get(self.key)
            .is_some_and(|current| Arc::ptr_eq(current, &self.flight))
        {
            inflight.remove(self.key);
        }
    }
}

impl<V> Drop for FlightGuard<'_, V> {
    fn drop(&mut self) {
        if !self.finished {
            self.flight.finish(Err(ExError::new(ExErrorKind::Internal)
                .with_op("cache_compute")
                .with_entity_id(self.key)
                .with_message("computation panicked")));
            self.leave();
        }
    }
}

/// Two-tier memoization for one result kind
pub struct TieredCache<V> {
    kind: CacheKind,
    providers: Vec<Box<dyn CacheProvider<V>>>,
    counters: KindCounters,
    inflight: Mutex<HashMap<String, Arc<Flight<V>>>>,
    generation: AtomicU64,
    /// Held shared while writing to the tiers, exclusively while bumping
    /// `generation`
    write_gate: RwLock<()>,
}

impl<V: Send + Sync + 'static> TieredCache<V> {
    /// An empty cache; every lookup computes
    pub fn new(kind: CacheKind) -> Self {
        Self {
            kind,
            providers: Vec::new(),
            counters: KindCounters::default(),
            inflight: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
            write_gate: RwLock::new(()),
        }
    }

    /// Append a provider; lookup order is registration order
    pub fn with_provider(mut self, provider: Box<dyn CacheProvider<V>>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn kind(&self) -> CacheKind {
        self.kind
    }

    pub fn tier_count(&self) -> usize {
        self.providers.len()
    }

    /// Return the cached value for `key`, computing and storing it on a miss
    ///
    /// # Errors
    ///
    /// Returns whatever `compute` returns. Tier failures are never returned.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Result<V>,
    {
        let generation = self.generation.load(Ordering::SeqCst);
        if let Some(value) = self.lookup(key, generation) {
            return Ok(value);
        }

        let (flight, generation) = {
            let mut inflight = self.inflight.lock();
            let existing = inflight.get(key).map(Arc::clone);
            if let Some(existing) = existing {
                drop(inflight);
                return existing.wait();
            }
            let flight = Arc::new(Flight::new());
            inflight.insert(key.to_string(), Arc::clone(&flight));
            // Read under the flight lock so an invalidation either removes
            // this flight or happened before it was registered
            (flight, self.generation.load(Ordering::SeqCst))
        };
        let guard = FlightGuard {
            cache: self,
            key,
            flight,
            finished: false,
        };

        // A previous leader may have stored the value between our lookup
        // and taking the flight.
        if let Some(value) = self.probe(key) {
            guard.finish(Ok(Arc::clone(&value)));
            return Ok(value);
        }

        let value = match compute() {
            Ok(value) => Arc::new(value),
            Err(err) => {
                guard.finish(Err(err.clone()));
                return Err(err);
            }
        };
        self.counters.record_computed();

        // Waiters are released once the local tiers hold the value; the
        // slower shared tiers are written afterwards.
        let local = self
            .providers
            .iter()
            .take_while(|provider| provider.tier() == Tier::L1)
            .count();
        self.store(key, &value, 0..local, generation);
        guard.finish(Ok(Arc::clone(&value)));
        self.store(key, &value, local..self.providers.len(), generation);
        Ok(value)
    }

    /// Remove every key starting with `prefix` from every tier
    ///
    /// Computations already running for matching keys keep their callers
    /// but never store their result; later callers start afresh.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        self.bump_generation(|key| key.starts_with(prefix));
        let mut removed = 0;
        for provider in &self.providers {
            match provider.invalidate_prefix(prefix) {
                Ok(count) => removed += count,
                Err(err) => self.warn_tier_failure(provider.as_ref(), prefix, &err),
            }
        }
        tracing::debug!(
            cache_kind = self.kind.as_str(),
            cache_key = prefix,
            removed,
            "Invalidated cache prefix"
        );
        removed
    }

    pub fn clear(&self) {
        self.bump_generation(|_| true);
        for provider in &self.providers {
            if let Err(err) = provider.clear() {
                self.warn_tier_failure(provider.as_ref(), self.kind.prefix(), &err);
            }
        }
    }

    pub fn stats(&self) -> KindStats {
        self.counters.snapshot()
    }

    pub fn reset_stats(&self) {
        self.counters.reset();
    }

    fn bump_generation(&self, matches: impl Fn(&str) -> bool) {
        let _gate = self.write_gate.write();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.inflight.lock().retain(|key, _| !matches(key));
    }

    fn lookup(&self, key: &str, generation: u64) -> Option<Arc<V>> {
        for (index, provider) in self.providers.iter().enumerate() {
            match provider.get(key) {
                Ok(Some(value)) => {
                    self.counters.record_hit(provider.tier());
                    self.store(key, &value, 0..index, generation);
                    return Some(value);
                }
                Ok(None) => self.counters.record_miss(provider.tier()),
                Err(err) => {
                    self.counters.record_miss(provider.tier());
                    self.warn_tier_failure(provider.as_ref(), key, &err);
                }
            }
        }
        None
    }

    /// Read the first tier without touching the counters
    fn probe(&self, key: &str) -> Option<Arc<V>> {
        self.providers
            .first()
            .and_then(|provider| provider.get(key).ok().flatten())
    }

    /// Write `value` into the providers in `tiers`, unless an invalidation
    /// has happened since `generation` was read
    fn store(&self, key: &str, value: &Arc<V>, tiers: Range<usize>, generation: u64) {
        if tiers.is_empty() {
            return;
        }
        let _gate = self.write_gate.read();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                cache_kind = self.kind.as_str(),
                cache_key = key,
                "Skipped store after invalidation"
            );
            return;
        }
        for provider in &self.providers[tiers] {
            if let Err(err) = provider.put(key, Arc::clone(value)) {
                self.warn_tier_failure(provider.as_ref(), key, &err);
            }
        }
    }

    fn warn_tier_failure(&self, provider: &dyn CacheProvider<V>, key: &str, err: &ExError) {
        tracing::warn!(
            component = module_path!(),
            cache_kind = self.kind.as_str(),
            cache_tier = provider.tier().as_str(),
            cache_key = key,
            err_code = err.code(),
            error = %err,
            "Cache tier failed; treating as miss"
        );
    }
}

impl<V> TieredCache<V>
where
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Build the tiers `config` asks for
    ///
    /// L1 is registered when the kind's capacity is non-zero; L2 when a
    /// shared backend is supplied.
    pub fn from_config(
        kind: CacheKind,
        config: &CacheConfig,
        shared: Option<Arc<dyn SharedCacheBackend>>,
    ) -> Self {
        let tier_config = config.for_kind(kind);
        let mut cache = Self::new(kind);
        if tier_config.capacity > 0 {
            cache = cache.with_provider(Box::new(LruTier::new(
                tier_config.capacity,
                tier_config.ttl,
            )));
        }
        if let Some(backend) = shared {
            let namespace = config
                .shared
                .as_ref()
                .map(|s| s.key_namespace.clone())
                .unwrap_or_default();
            cache = cache.with_provider(Box::new(SharedTier::new(
                backend,
                namespace,
                kind,
                tier_config.ttl,
            )));
        }
        tracing::debug!(
            cache_kind = kind.as_str(),
            tiers = cache.tier_count(),
            "Cache ready"
        );
        cache
    }
}
