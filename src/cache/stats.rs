//! Cache Statistics Module
//!
//! Tracks cache performance counters and exposes read-only store snapshots.

use serde::Serialize;

// == Cache Counters ==
/// Running hit/miss/eviction counters for the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheCounters {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted to satisfy the size bound
    pub evictions: u64,
}

impl CacheCounters {
    /// Creates counters with all values at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Store Stats ==
/// Point-in-time snapshot of the store, introspection only.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    /// Current number of entries
    pub size: usize,
    /// Every key currently held
    pub keys: Vec<String>,
    /// Key with the oldest creation time, if any
    pub oldest_key: Option<String>,
    /// Key with the newest creation time, if any
    pub newest_key: Option<String>,
    /// Lookup/eviction counters at snapshot time
    pub counters: CacheCounters,
    /// Wall-clock time the snapshot was taken
    pub captured_at: chrono::DateTime<chrono::Utc>,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_new() {
        let counters = CacheCounters::new();
        assert_eq!(counters.hits, 0);
        assert_eq!(counters.misses, 0);
        assert_eq!(counters.evictions, 0);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        assert_eq!(CacheCounters::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut counters = CacheCounters::new();
        counters.record_hit();
        counters.record_miss();
        assert_eq!(counters.hit_rate(), 0.5);
    }

    #[test]
    fn test_record_eviction() {
        let mut counters = CacheCounters::new();
        counters.record_eviction();
        counters.record_eviction();
        assert_eq!(counters.evictions, 2);
    }
}
