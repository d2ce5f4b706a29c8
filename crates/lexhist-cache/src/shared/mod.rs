//! Shared L2 tier: JSON payloads in a key/value server with expiry
//!
//! The tier is split in two. [`SharedCacheBackend`] moves raw strings and
//! knows nothing about result types; [`SharedTier`] namespaces keys and
//! encodes values with serde_json.

mod breaker;
mod memory;
mod redis_backend;

pub use breaker::BreakerBackend;
pub use memory::InMemorySharedBackend;
pub use redis_backend::RedisBackend;

use lexhist_core::{ExError, ExErrorKind, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheKind;
use crate::provider::{CacheProvider, Tier};

/// Raw string storage with per-key expiry
pub trait SharedCacheBackend: Send + Sync {
    /// Short backend name for log fields
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns `CacheBackendUnavailable` or `Timeout` when the server cannot
    /// answer.
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns `CacheBackendUnavailable` or `Timeout` when the server cannot
    /// answer.
    fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// # Errors
    ///
    /// Returns `CacheBackendUnavailable` or `Timeout` when the server cannot
    /// answer.
    fn delete_prefix(&self, prefix: &str) -> Result<usize>;
}

/// L2 provider for one cache kind
pub struct SharedTier<V> {
    backend: Arc<dyn SharedCacheBackend>,
    namespace: String,
    kind: CacheKind,
    ttl: Duration,
    _value: PhantomData<fn() -> V>,
}

impl<V> SharedTier<V> {
    pub fn new(
        backend: Arc<dyn SharedCacheBackend>,
        namespace: impl Into<String>,
        kind: CacheKind,
        ttl: Duration,
    ) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            kind,
            ttl,
            _value: PhantomData,
        }
    }

    fn namespaced(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.namespace, key)
        }
    }
}

impl<V> CacheProvider<V> for SharedTier<V>
where
    V: Serialize + DeserializeOwned + Send + Sync,
{
    fn tier(&self) -> Tier {
        Tier::L2
    }

    fn get(&self, key: &str) -> Result<Option<Arc<V>>> {
        let key = self.namespaced(key);
        let Some(raw) = self.backend.get_raw(&key)? else {
            return Ok(None);
        };
        let value: V = serde_json::from_str(&raw).map_err(|e| {
            ExError::from(e)
                .with_op("l2_decode")
                .with_entity_id(key.clone())
        })?;
        Ok(Some(Arc::new(value)))
    }

    fn put(&self, key: &str, value: Arc<V>) -> Result<()> {
        let raw = serde_json::to_string(value.as_ref())
            .map_err(|e| ExError::from(e).with_op("l2_encode"))?;
        self.backend.set_raw(&self.namespaced(key), &raw, self.ttl)
    }

    fn invalidate_prefix(&self, prefix: &str) -> Result<usize> {
        self.backend.delete_prefix(&self.namespaced(prefix))
    }

    fn clear(&self) -> Result<()> {
        let prefix = self.namespaced(&format!("{}:", self.kind.prefix()));
        self.backend.delete_prefix(&prefix).map(|_| ())
    }
}

pub(crate) fn backend_error(kind: ExErrorKind, op: &str, reason: impl Into<String>) -> ExError {
    ExError::new(kind)
        .with_op(op)
        .with_entity_id(lexhist_core_types::schema::TIER_L2)
        .with_message(reason)
}
