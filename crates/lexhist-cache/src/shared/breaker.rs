use lexhist_core::{ExErrorKind, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{backend_error, SharedCacheBackend};

/// Fail-fast wrapper around a shared backend
///
/// After any failure the wrapped backend is skipped for `cool_down`; calls
/// in that window fail at once with `CacheBackendUnavailable`. The first
/// call after the window goes through and either closes the breaker or
/// opens it again.
pub struct BreakerBackend {
    inner: Arc<dyn SharedCacheBackend>,
    cool_down: Duration,
    open_until: Mutex<Option<Instant>>,
}

impl BreakerBackend {
    pub fn new(inner: Arc<dyn SharedCacheBackend>, cool_down: Duration) -> Self {
        Self {
            inner,
            cool_down,
            open_until: Mutex::new(None),
        }
    }

    /// Whether calls are currently being skipped
    pub fn is_open(&self) -> bool {
        let open_until = *self.open_until.lock();
        open_until.is_some_and(|until| Instant::now() < until)
    }

    fn guarded<T>(&self, op: &str, f: impl FnOnce(&dyn SharedCacheBackend) -> Result<T>) -> Result<T> {
        if self.is_open() {
            return Err(backend_error(
                ExErrorKind::CacheBackendUnavailable,
                op,
                "skipped while backend is cooling down",
            ));
        }

        let result = f(self.inner.as_ref());
        let mut open_until = self.open_until.lock();
        match &result {
            Ok(_) => {
                if open_until.take().is_some() {
                    tracing::info!(
                        component = module_path!(),
                        backend = self.inner.name(),
                        "Shared cache backend recovered"
                    );
                }
            }
            Err(err) => {
                if open_until.is_none() {
                    tracing::warn!(
                        component = module_path!(),
                        backend = self.inner.name(),
                        op,
                        err_code = err.code(),
                        cool_down_ms = self.cool_down.as_millis() as u64,
                        "Shared cache backend failed; skipping it"
                    );
                }
                *open_until = Some(Instant::now() + self.cool_down);
            }
        }
        result
    }
}

impl SharedCacheBackend for BreakerBackend {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.guarded("l2_get", |inner| inner.get_raw(key))
    }

    fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.guarded("l2_set", |inner| inner.set_raw(key, value, ttl))
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        self.guarded("l2_delete_prefix", |inner| inner.delete_prefix(prefix))
    }
}
