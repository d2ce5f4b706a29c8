use lexhist_core::{ExErrorKind, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::{backend_error, SharedCacheBackend};

/// Process-local stand-in for a shared cache server
///
/// Useful for single-process deployments and for exercising the L2 code
/// path in tests. `set_available(false)` makes every call fail the way an
/// unreachable server would.
#[derive(Default)]
pub struct InMemorySharedBackend {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    unavailable: AtomicBool,
}

impl InMemorySharedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .get(key)
            .is_some_and(|(_, expires_at)| *expires_at > Instant::now())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn check(&self, op: &str) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(backend_error(
                ExErrorKind::CacheBackendUnavailable,
                op,
                "in-memory backend marked unavailable",
            ));
        }
        Ok(())
    }
}

impl SharedCacheBackend for InMemorySharedBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.check("l2_get")?;
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.check("l2_set")?;
        self.entries
            .lock()
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        self.check("l2_delete_prefix")?;
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_backend_fails_every_call() {
        let backend = InMemorySharedBackend::new();
        backend.set_raw("k", "v", Duration::from_secs(1)).unwrap();
        backend.set_available(false);

        let err = backend.get_raw("k").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::CacheBackendUnavailable);
        assert!(backend.set_raw("k", "v", Duration::from_secs(1)).is_err());
        assert!(backend.delete_prefix("k").is_err());

        backend.set_available(true);
        assert_eq!(backend.get_raw("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_expired_entry_reads_as_absent() {
        let backend = InMemorySharedBackend::new();
        backend.set_raw("k", "v", Duration::ZERO).unwrap();
        assert!(backend.get_raw("k").unwrap().is_none());
        assert!(backend.is_empty());
    }
}
