use lexhist_core::{ExError, ExErrorKind, Result};
use parking_lot::Mutex;
use std::time::Duration;

use super::{backend_error, SharedCacheBackend};
use crate::config::SharedCacheConfig;

const SCAN_BATCH: usize = 200;

/// Redis-backed shared tier
///
/// Keeps at most one idle connection, opened lazily and discarded after
/// any failed command so the next call reconnects. A caller that finds no
/// idle connection opens its own. Every connect, read and write is
/// bounded by the configured timeout.
pub struct RedisBackend {
    client: ::redis::Client,
    timeout: Duration,
    conn: Mutex<Option<::redis::Connection>>,
}

impl RedisBackend {
    /// Validate the URL without connecting
    ///
    /// # Errors
    ///
    /// Returns `CacheBackendUnavailable` when the URL cannot be parsed.
    pub fn new(config: &SharedCacheConfig) -> Result<Self> {
        let client = ::redis::Client::open(config.url.expose().as_str())
            .map_err(|e| redis_error("l2_open", &e))?;
        Ok(Self {
            client,
            timeout: config.timeout,
            conn: Mutex::new(None),
        })
    }

    fn connect(&self) -> Result<::redis::Connection> {
        let conn = self
            .client
            .get_connection_with_timeout(self.timeout)
            .map_err(|e| redis_error("l2_connect", &e))?;
        conn.set_read_timeout(Some(self.timeout))
            .map_err(|e| redis_error("l2_connect", &e))?;
        conn.set_write_timeout(Some(self.timeout))
            .map_err(|e| redis_error("l2_connect", &e))?;
        Ok(conn)
    }

    fn with_connection<T>(
        &self,
        op: &str,
        f: impl FnOnce(&mut ::redis::Connection) -> ::redis::RedisResult<T>,
    ) -> Result<T> {
        // The slot lock is never held across a connect
        let idle = self.conn.lock().take();
        let mut conn = match idle {
            Some(conn) => conn,
            None => self.connect()?,
        };
        let result = f(&mut conn).map_err(|e| redis_error(op, &e));
        if result.is_ok() {
            let mut slot = self.conn.lock();
            if slot.is_none() {
                *slot = Some(conn);
            }
        }
        result
    }
}

impl SharedCacheBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.with_connection("l2_get", |conn| {
            ::redis::cmd("GET").arg(key).query::<Option<String>>(conn)
        })
    }

    fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let seconds = ttl.as_secs().max(1);
        self.with_connection("l2_set", |conn| {
            ::redis::cmd("SET")
                .arg(key)
                .arg(value)
                .arg("EX")
                .arg(seconds)
                .query::<()>(conn)
        })
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let pattern = format!("{}*", escape_glob(prefix));
        self.with_connection("l2_delete_prefix", |conn| {
            let mut keys: Vec<String> = Vec::new();
            let mut cursor: u64 = 0;
            loop {
                let (next, batch): (u64, Vec<String>) = ::redis::cmd("SCAN")
                    .cursor_arg(cursor)
                    .arg("MATCH")
                    .arg(&pattern)
                    .arg("COUNT")
                    .arg(SCAN_BATCH)
                    .query(conn)?;
                keys.extend(batch);
                if next == 0 {
                    break;
                }
                cursor = next;
            }
            if keys.is_empty() {
                return Ok(0);
            }
            ::redis::cmd("DEL").arg(&keys).query::<usize>(conn)
        })
    }
}

fn redis_error(op: &str, err: &::redis::RedisError) -> ExError {
    let kind = if err.is_timeout() {
        ExErrorKind::Timeout
    } else {
        ExErrorKind::CacheBackendUnavailable
    };
    backend_error(kind, op, err.to_string())
}

/// Escape the characters SCAN MATCH treats as glob syntax
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_glob() {
        assert_eq!(escape_glob("law-version:1977:1160:"), "law-version:1977:1160:");
        assert_eq!(escape_glob("a*b?[c]\\"), "a\\*b\\?\\[c\\]\\\\");
    }

    #[test]
    fn test_invalid_url_is_rejected_without_connecting() {
        let config = SharedCacheConfig::new("not a url");
        assert!(RedisBackend::new(&config).is_err());
    }

    #[test]
    fn test_unreachable_server_reports_backend_error() {
        // port 1 on loopback refuses connections
        let config = SharedCacheConfig::new("redis://127.0.0.1:1/")
            .with_timeout(Duration::from_millis(50));
        let backend = RedisBackend::new(&config).unwrap();
        let err = backend.get_raw("k").unwrap_err();
        assert!(matches!(
            err.kind(),
            ExErrorKind::CacheBackendUnavailable | ExErrorKind::Timeout
        ));
    }
}
