//! Stats Tracker (C7) data types: the period/lifetime counter planes and the
//! persisted per-hour and top-domain rows. See SPEC_FULL.md §3 and §4.7.

use std::collections::HashMap;
use std::sync::Arc;

/// One (date, hour) bucket as persisted in `guardian_query_stats`.
#[derive(Debug, Clone, Default)]
pub struct QueryHourStats {
    pub date: String,
    pub hour: u8,
    pub total_queries: u64,
    pub blocked_queries: u64,
    pub allowed_queries: u64,
    pub cache_hits: u64,
}

/// Rolling per-domain block counter, persisted in `guardian_top_domains`.
#[derive(Debug, Clone)]
pub struct TopBlockedDomain {
    pub domain: Arc<str>,
    pub block_count: u64,
    pub category: Arc<str>,
    pub last_blocked: String,
}

/// The mutable period counters the Stats Tracker accumulates between
/// flushes; zeroed on every successful `flush()`.
#[derive(Debug, Clone, Default)]
pub struct PeriodCounters {
    pub total: u64,
    pub blocked: u64,
    pub allowed: u64,
    pub cache_hits: u64,
    pub blocked_by_domain: HashMap<Arc<str>, u64>,
}

impl PeriodCounters {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn reset(&mut self) {
        self.total = 0;
        self.blocked = 0;
        self.allowed = 0;
        self.cache_hits = 0;
        self.blocked_by_domain.clear();
    }
}

/// Monotonic, never-reset counters, reported alongside the current period in
/// `summary()`.
#[derive(Debug, Clone, Default)]
pub struct LifetimeCounters {
    pub total: u64,
    pub blocked: u64,
    pub allowed: u64,
    pub cache_hits: u64,
}

#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub period: PeriodCounters,
    pub lifetime: LifetimeCounters,
    pub top_blocked: Vec<(Arc<str>, u64)>,
}

/// Cache (C1) stats, per SPEC_FULL.md §4.1 `stats()`.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub size: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
