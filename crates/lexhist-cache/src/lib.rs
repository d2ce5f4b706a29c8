//! lexhist cache - two-tier memoization of reconstructions and diffs
//!
//! Provides:
//! - [`CacheProvider`], a uniform get/put/invalidate capability per tier
//! - [`LruTier`], the bounded process-local L1 tier with per-entry TTL
//! - [`SharedTier`], the fleet-wide L2 tier over a [`SharedCacheBackend`]
//!   (Redis, or in-memory for tests and single-process deployments)
//! - [`BreakerBackend`], which skips a failing backend for a cool-down
//! - [`TieredCache`], an ordered provider list with back-fill, per-tier
//!   stats and single-flight computation
//!
//! A failing tier never propagates: errors are logged and counted as misses.

pub mod config;
pub mod keys;
pub mod lru_tier;
pub mod provider;
pub mod shared;
pub mod stats;
pub mod tiered;

pub use config::{CacheConfig, CacheKind, SharedCacheConfig, TierConfig};
pub use lru_tier::LruTier;
pub use provider::{CacheProvider, Tier};
pub use shared::{
    BreakerBackend, InMemorySharedBackend, RedisBackend, SharedCacheBackend, SharedTier,
};
pub use stats::{CacheStats, KindStats, TierStats};
pub use tiered::TieredCache;
