//! Cache Statistics Module
//!
//! Tracks block hash cache activity: hits, misses, evictions and the
//! recomputations and corrections performed by `get_or_compute`.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance and integrity counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups that found an entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries evicted due to LRU policy
    pub evictions: u64,
    /// PoW hashes computed by `get_or_compute`
    pub recomputations: u64,
    /// Cached values found to differ from a fresh computation
    pub corrections: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookups served, hit or miss.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of lookups that hit, 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }

    /// Share of recomputations that replaced a bad cached value.
    pub fn correction_rate(&self) -> f64 {
        match self.recomputations {
            0 => 0.0,
            n => self.corrections as f64 / n as f64,
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_recomputation(&mut self) {
        self.recomputations += 1;
    }

    pub fn record_correction(&mut self) {
        self.corrections += 1;
    }

    pub(crate) fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.lookups(), 4);
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_integrity_counters() {
        let mut stats = CacheStats::new();
        stats.record_recomputation();
        stats.record_recomputation();
        stats.record_correction();
        stats.record_eviction();
        assert_eq!(stats.recomputations, 2);
        assert_eq!(stats.corrections, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.correction_rate(), 0.5);
    }
}
