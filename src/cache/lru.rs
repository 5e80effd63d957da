//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch hands the key a fresh ticket and appends `(ticket, key)` to
/// the queue, where:
/// - Front = Least recently used
/// - Back = Most recently used
///
/// A queued pair is live only while its ticket matches the key's current
/// ticket in `tickets`. Stale pairs are skipped on eviction and dropped by
/// compaction, so touch, remove and evict are O(1) amortized.
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Current ticket for each tracked key
    tickets: HashMap<K, u64>,
    /// Access order, possibly holding stale pairs
    order: VecDeque<(u64, K)>,
    /// Next ticket to hand out
    next_ticket: u64,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            tickets: HashMap::new(),
            order: VecDeque::new(),
            next_ticket: 0,
        }
    }
}

impl<K: Copy + Eq + Hash> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: K) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.tickets.insert(key, ticket);
        self.order.push_back((ticket, key));
        self.maybe_compact();
    }

    // == Remove ==
    /// Stops tracking a key. Its queued pair goes stale.
    pub fn remove(&mut self, key: &K) {
        if self.tickets.remove(key).is_some() {
            self.maybe_compact();
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        while let Some((ticket, key)) = self.order.pop_front() {
            if self.is_live(ticket, &key) {
                self.tickets.remove(&key);
                return Some(key);
            }
        }
        None
    }

    // == Iterate ==
    /// Live keys from least to most recently used.
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = K> + '_ {
        self.order
            .iter()
            .filter(|(ticket, key)| self.is_live(*ticket, key))
            .map(|(_, key)| *key)
    }

    // == Clear ==
    /// Forgets every key.
    pub fn clear(&mut self) {
        self.tickets.clear();
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    fn is_live(&self, ticket: u64, key: &K) -> bool {
        self.tickets.get(key) == Some(&ticket)
    }

    /// Rebuilds the queue once stale pairs outnumber live ones.
    fn maybe_compact(&mut self) {
        if self.order.len() <= 2 * self.tickets.len() + 32 {
            return;
        }
        let tickets = &self.tickets;
        self.order.retain(|(ticket, key)| tickets.get(key) == Some(ticket));
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru: LruTracker<u32> = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut lru = LruTracker::new();

        lru.touch(1);
        lru.touch(2);
        lru.touch(3);

        // Touch 1 again - should become most recent
        lru.touch(1);

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.iter_oldest_first().next(), Some(2));
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruTracker::new();

        lru.touch('a');
        lru.touch('b');
        lru.touch('c');

        // Order after touches (oldest first): a, c, b
        lru.touch('a');
        lru.touch('c');
        lru.touch('b');

        assert_eq!(lru.evict_oldest(), Some('a'));
        assert_eq!(lru.evict_oldest(), Some('c'));
        assert_eq!(lru.evict_oldest(), Some('b'));
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove_skips_on_evict() {
        let mut lru = LruTracker::new();

        lru.touch(1);
        lru.touch(2);
        lru.touch(3);
        lru.remove(&1);
        lru.remove(&42);

        assert_eq!(lru.len(), 2);
        assert!(lru.iter_oldest_first().all(|k| k != 1));
        assert_eq!(lru.evict_oldest(), Some(2));
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = LruTracker::new();

        lru.touch(7);
        lru.touch(7);
        lru.touch(7);

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.iter_oldest_first().collect::<Vec<_>>(), vec![7]);
        assert_eq!(lru.evict_oldest(), Some(7));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_compaction_bounds_queue() {
        let mut lru = LruTracker::new();

        lru.touch(1u64);
        lru.touch(2u64);
        for _ in 0..10_000 {
            lru.touch(1u64);
        }

        assert!(lru.order.len() <= 2 * lru.len() + 33);
        assert_eq!(lru.iter_oldest_first().collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = LruTracker::new();
        lru.touch(1);
        lru.touch(2);
        lru.clear();
        assert!(lru.is_empty());
        assert_eq!(lru.evict_oldest(), None);
    }
}
