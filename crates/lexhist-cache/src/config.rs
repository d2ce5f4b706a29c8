//! Cache configuration, injected at construction
//!
//! There is no global cache state: whoever builds the service decides
//! capacities, TTLs and whether a shared tier exists at all.

use lexhist_core_types::Sensitive;
use std::time::Duration;

const HOUR: Duration = Duration::from_secs(60 * 60);

/// The three memoized result kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    Version,
    Diff,
    Timeline,
}

impl CacheKind {
    pub const ALL: [CacheKind; 3] = [CacheKind::Version, CacheKind::Diff, CacheKind::Timeline];

    /// Key prefix shared by every tier
    pub fn prefix(&self) -> &'static str {
        match self {
            CacheKind::Version => "law-version",
            CacheKind::Diff => "law-diff",
            CacheKind::Timeline => "law-timeline",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKind::Version => "version",
            CacheKind::Diff => "diff",
            CacheKind::Timeline => "timeline",
        }
    }
}

/// Capacity and lifetime of one kind's entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierConfig {
    /// Maximum L1 entries; zero disables the L1 tier for this kind
    pub capacity: usize,
    pub ttl: Duration,
}

impl TierConfig {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self { capacity, ttl }
    }

    pub fn defaults_for(kind: CacheKind) -> Self {
        match kind {
            CacheKind::Version => Self::new(500, 24 * HOUR),
            CacheKind::Diff => Self::new(200, HOUR),
            CacheKind::Timeline => Self::new(200, 24 * HOUR),
        }
    }
}

/// Connection settings for the shared L2 tier
#[derive(Debug, Clone)]
pub struct SharedCacheConfig {
    /// Connection URL; may embed credentials, so never logged
    pub url: Sensitive<String>,
    /// Bound on connect, read and write
    pub timeout: Duration,
    /// Prepended to every key so several deployments can share one server
    pub key_namespace: String,
    /// How long the tier is skipped after a failed call
    pub failure_cool_down: Duration,
}

impl SharedCacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Sensitive::new(url.into()),
            timeout: Duration::from_millis(250),
            key_namespace: "lexhist".to_string(),
            failure_cool_down: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_failure_cool_down(mut self, cool_down: Duration) -> Self {
        self.failure_cool_down = cool_down;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.key_namespace = namespace.into();
        self
    }
}

/// Complete cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub version: TierConfig,
    pub diff: TierConfig,
    pub timeline: TierConfig,
    /// `None` runs L1-only
    pub shared: Option<SharedCacheConfig>,
}

impl CacheConfig {
    pub fn for_kind(&self, kind: CacheKind) -> TierConfig {
        match kind {
            CacheKind::Version => self.version,
            CacheKind::Diff => self.diff,
            CacheKind::Timeline => self.timeline,
        }
    }

    pub fn with_shared(mut self, shared: SharedCacheConfig) -> Self {
        self.shared = Some(shared);
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            version: TierConfig::defaults_for(CacheKind::Version),
            diff: TierConfig::defaults_for(CacheKind::Diff),
            timeline: TierConfig::defaults_for(CacheKind::Timeline),
            shared: None,
        }
    }
}
