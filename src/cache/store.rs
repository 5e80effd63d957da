//! Hash Store Module
//!
//! Unlocked storage engine combining a HashMap with LRU tracking. The
//! block hash cache wraps it in a mutex; nothing here synchronizes.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::primitives::{Fingerprint, PowHash};

// == Hash Store ==
/// Bounded fingerprint → PoW hash map with LRU eviction.
#[derive(Debug)]
pub struct HashStore {
    /// Key-value storage
    entries: HashMap<Fingerprint, PowHash>,
    /// LRU access tracker
    lru: LruTracker<Fingerprint>,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl HashStore {
    // == Constructor ==
    /// Creates a store holding at most `max_entries` (minimum 1) entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Lookup ==
    /// Returns the cached value and marks it most recently used.
    pub fn lookup(&mut self, fingerprint: &Fingerprint) -> Option<PowHash> {
        match self.entries.get(fingerprint) {
            Some(value) => {
                let value = *value;
                self.stats.record_hit();
                self.lru.touch(*fingerprint);
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Inserts or overwrites an entry and marks it most recently used.
    ///
    /// If this pushes the store past capacity, the least recently used
    /// entry is evicted.
    pub fn insert(&mut self, fingerprint: Fingerprint, value: PowHash) {
        self.entries.insert(fingerprint, value);
        self.lru.touch(fingerprint);

        while self.entries.len() > self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
                None => break,
            }
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Erase ==
    /// Removes an entry. Returns whether it was present.
    pub fn erase(&mut self, fingerprint: &Fingerprint) -> bool {
        let removed = self.entries.remove(fingerprint).is_some();
        if removed {
            self.lru.remove(fingerprint);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Drops every entry and returns how many there were. Counters other
    /// than the entry count are kept.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
        dropped
    }

    // == Entries ==
    /// All entries from least to most recently used.
    pub fn entries_oldest_first(&self) -> Vec<CacheEntry> {
        self.lru
            .iter_oldest_first()
            .filter_map(|fp| self.entries.get(&fp).map(|v| CacheEntry::new(fp, *v)))
            .collect()
    }

    // == Stats ==
    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Mutable counters, for recomputation bookkeeping done by the owner.
    pub(crate) fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Hash256;

    fn fp(n: u8) -> Fingerprint {
        Hash256([n; 32])
    }

    fn pow(n: u8) -> PowHash {
        Hash256([n.wrapping_add(100); 32])
    }

    fn holds(store: &HashStore, fingerprint: Fingerprint) -> bool {
        store
            .entries_oldest_first()
            .iter()
            .any(|e| e.fingerprint == fingerprint)
    }

    #[test]
    fn test_store_new() {
        let store = HashStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(HashStore::new(0).max_entries(), 1);
    }

    #[test]
    fn test_store_insert_and_lookup() {
        let mut store = HashStore::new(100);

        store.insert(fp(1), pow(1));

        assert_eq!(store.lookup(&fp(1)), Some(pow(1)));
        assert_eq!(store.lookup(&fp(2)), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_erase() {
        let mut store = HashStore::new(100);

        store.insert(fp(1), pow(1));
        assert!(store.erase(&fp(1)));
        assert!(!store.erase(&fp(1)));

        assert!(store.is_empty());
        assert_eq!(store.lookup(&fp(1)), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = HashStore::new(100);

        store.insert(fp(1), pow(1));
        store.insert(fp(1), pow(2));

        assert_eq!(store.lookup(&fp(1)), Some(pow(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = HashStore::new(3);

        store.insert(fp(1), pow(1));
        store.insert(fp(2), pow(2));
        store.insert(fp(3), pow(3));

        // Store is full, inserting fp(4) evicts fp(1) (oldest)
        store.insert(fp(4), pow(4));

        assert_eq!(store.len(), 3);
        assert!(!holds(&store, fp(1)));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_lookup() {
        let mut store = HashStore::new(3);

        store.insert(fp(1), pow(1));
        store.insert(fp(2), pow(2));
        store.insert(fp(3), pow(3));

        // Access fp(1) to make it most recently used
        store.lookup(&fp(1));

        // Inserting fp(4) evicts fp(2) (now oldest)
        store.insert(fp(4), pow(4));

        assert!(holds(&store, fp(1)));
        assert!(!holds(&store, fp(2)));
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut store = HashStore::new(2);

        store.insert(fp(1), pow(1));
        store.insert(fp(2), pow(2));
        store.insert(fp(1), pow(9));

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
        let order: Vec<_> = store
            .entries_oldest_first()
            .into_iter()
            .map(|e| e.fingerprint)
            .collect();
        assert_eq!(order, vec![fp(2), fp(1)]);
    }

    #[test]
    fn test_store_stats() {
        let mut store = HashStore::new(100);

        store.insert(fp(1), pow(1));
        store.lookup(&fp(1)); // hit
        store.lookup(&fp(9)); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_clear_keeps_counters() {
        let mut store = HashStore::new(100);

        store.insert(fp(1), pow(1));
        store.lookup(&fp(1));
        assert_eq!(store.clear(), 1);

        assert!(store.is_empty());
        assert!(store.entries_oldest_first().is_empty());
        assert_eq!(store.stats().hits, 1);
    }
}
