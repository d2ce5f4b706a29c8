//! Bounded process-local tier: LRU eviction plus per-entry expiry

use lexhist_core::Result;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::provider::{CacheProvider, Tier};

struct Entry<V> {
    value: Arc<V>,
    expires_at: Instant,
}

/// In-memory L1 tier
///
/// Expired entries are dropped lazily on access; capacity pressure evicts
/// the least recently used entry first.
pub struct LruTier<V> {
    entries: Mutex<LruCache<String, Entry<V>>>,
    ttl: Duration,
}

impl<V> LruTier<V> {
    /// A capacity of zero is raised to one; callers that want no L1 tier
    /// simply do not register one.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}

impl<V: Send + Sync> CacheProvider<V> for LruTier<V> {
    fn tier(&self) -> Tier {
        Tier::L1
    }

    fn get(&self, key: &str) -> Result<Option<Arc<V>>> {
        let mut entries = self.entries.lock();
        let now = Instant::now();
        match entries.get(key) {
            None => return Ok(None),
            Some(entry) if entry.expires_at > now => return Ok(Some(Arc::clone(&entry.value))),
            Some(_) => {}
        }
        entries.pop(key);
        Ok(None)
    }

    fn put(&self, key: &str, value: Arc<V>) -> Result<()> {
        let entry = Entry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.lock().put(key.to_string(), entry);
        Ok(())
    }

    fn invalidate_prefix(&self, prefix: &str) -> Result<usize> {
        let mut entries = self.entries.lock();
        let doomed: Vec<String> = entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            entries.pop(key);
        }
        Ok(doomed.len())
    }

    fn clear(&self) -> Result<()> {
        self.entries.lock().clear();
        Ok(())
    }
}
