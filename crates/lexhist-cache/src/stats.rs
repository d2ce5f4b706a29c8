//! Per-kind, per-tier hit/miss accounting

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::CacheKind;
use crate::provider::Tier;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierStats {
    pub hits: u64,
    pub misses: u64,
}

impl TierStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// hits / (hits + misses), 0.0 before the first lookup
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

/// Counters for one cache kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindStats {
    pub l1: TierStats,
    pub l2: TierStats,
    /// Times the underlying computation actually ran
    pub computed: u64,
}

impl KindStats {
    pub fn tier(&self, tier: Tier) -> TierStats {
        match tier {
            Tier::L1 => self.l1,
            Tier::L2 => self.l2,
        }
    }
}

/// Snapshot of all cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub version: KindStats,
    pub diff: KindStats,
    pub timeline: KindStats,
}

impl CacheStats {
    pub fn kind(&self, kind: CacheKind) -> KindStats {
        match kind {
            CacheKind::Version => self.version,
            CacheKind::Diff => self.diff,
            CacheKind::Timeline => self.timeline,
        }
    }

    /// Share of requests answered by any tier instead of a computation
    pub fn overall_hit_rate(&self) -> f64 {
        let kinds = [self.version, self.diff, self.timeline];
        let hits: u64 = kinds.iter().map(|k| k.l1.hits + k.l2.hits).sum();
        let computed: u64 = kinds.iter().map(|k| k.computed).sum();
        match hits + computed {
            0 => 0.0,
            total => hits as f64 / total as f64,
        }
    }

    pub fn set_kind(&mut self, kind: CacheKind, stats: KindStats) {
        match kind {
            CacheKind::Version => self.version = stats,
            CacheKind::Diff => self.diff = stats,
            CacheKind::Timeline => self.timeline = stats,
        }
    }
}

#[derive(Debug, Default)]
struct TierCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TierCounters {
    fn snapshot(&self) -> TierStats {
        TierStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[derive(Debug, Default)]
pub(crate) struct KindCounters {
    l1: TierCounters,
    l2: TierCounters,
    computed: AtomicU64,
}

impl KindCounters {
    fn tier(&self, tier: Tier) -> &TierCounters {
        match tier {
            Tier::L1 => &self.l1,
            Tier::L2 => &self.l2,
        }
    }

    pub(crate) fn record_hit(&self, tier: Tier) {
        self.tier(tier).hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self, tier: Tier) {
        self.tier(tier).misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_computed(&self) {
        self.computed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> KindStats {
        KindStats {
            l1: self.l1.snapshot(),
            l2: self.l2.snapshot(),
            computed: self.computed.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.l1.reset();
        self.l2.reset();
        self.computed.store(0, Ordering::Relaxed);
    }
}
