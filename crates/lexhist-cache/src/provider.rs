//! The capability every cache tier implements

use lexhist_core::Result;
use lexhist_core_types::schema::{TIER_L1, TIER_L2};
use std::sync::Arc;

/// Position of a provider in the lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Process-local, bounded
    L1,
    /// Shared across processes
    L2,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::L1 => TIER_L1,
            Tier::L2 => TIER_L2,
        }
    }
}

/// Uniform get/put/invalidate over one storage tier
///
/// Errors are reported, never swallowed here; the tiered cache decides
/// that a failing tier degrades to a miss.
pub trait CacheProvider<V>: Send + Sync {
    fn tier(&self) -> Tier;

    /// # Errors
    ///
    /// Returns an error when the tier cannot be read or the stored payload
    /// cannot be decoded.
    fn get(&self, key: &str) -> Result<Option<Arc<V>>>;

    /// # Errors
    ///
    /// Returns an error when the tier cannot be written.
    fn put(&self, key: &str, value: Arc<V>) -> Result<()>;

    /// Remove every entry whose key starts with `prefix`, returning how many went
    ///
    /// # Errors
    ///
    /// Returns an error when the tier cannot be scanned or written.
    fn invalidate_prefix(&self, prefix: &str) -> Result<usize>;

    /// # Errors
    ///
    /// Returns an error when the tier cannot be written.
    fn clear(&self) -> Result<()>;
}
