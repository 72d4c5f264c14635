//! Cache Store Module
//!
//! Plain HashMap-backed storage with time-based purging. Holds no lock of its
//! own; `TimedCache` wraps it in a mutex shared with the reaper.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats, CachedValue, Lookup};

// == Cache Store ==
/// Key-value storage keyed by caller fingerprint.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Stores `value` under `key`, stamped with the current time.
    ///
    /// An existing entry for the key is replaced and its age starts over.
    pub fn add(&mut self, key: impl Into<String>, value: CachedValue) {
        self.add_at(key, value, Instant::now());
    }

    /// Same as [`CacheStore::add`] with an explicit insertion time.
    pub fn add_at(&mut self, key: impl Into<String>, value: CachedValue, now: Instant) {
        self.entries.insert(key.into(), CacheEntry::at(value, now));
        self.stats.record_insertion();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Looks up `key` without changing its age.
    ///
    /// Staleness is not checked here; stale entries stay visible until the
    /// reaper removes them.
    pub fn get(&mut self, key: &str) -> Lookup {
        let lookup = match self.entries.get(key) {
            Some(entry) => Lookup::from(&entry.value),
            None => Lookup::Miss,
        };

        match lookup {
            Lookup::Hit(_) => self.stats.record_hit(),
            Lookup::NegativeHit => self.stats.record_negative_hit(),
            Lookup::Miss => self.stats.record_miss(),
        }
        lookup
    }

    // == Reap ==
    /// Removes every entry older than `interval` as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn reap_older_than(&mut self, now: Instant, interval: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(now, interval));
        let removed = before - self.entries.len();

        self.stats.record_reap(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_miss_then_hit() {
        let mut store = CacheStore::new();

        assert_eq!(store.get("a"), Lookup::Miss);
        store.add("a", CachedValue::Present(vec![1, 2, 3]));
        assert_eq!(store.get("a"), Lookup::Hit(vec![1, 2, 3]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_negative_hit() {
        let mut store = CacheStore::new();

        store.add("missingno", CachedValue::Absent);
        let lookup = store.get("missingno");

        assert_eq!(lookup, Lookup::NegativeHit);
        assert!(lookup.found());
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();

        store.add("key1", CachedValue::Present(b"value1".to_vec()));
        store.add("key1", CachedValue::Present(b"value2".to_vec()));

        assert_eq!(store.get("key1"), Lookup::Hit(b"value2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_positive_with_negative() {
        let mut store = CacheStore::new();

        store.add("key1", CachedValue::Present(vec![9]));
        store.add("key1", CachedValue::Absent);

        assert_eq!(store.get("key1"), Lookup::NegativeHit);
    }

    #[test]
    fn test_store_reap_removes_only_stale() {
        let mut store = CacheStore::new();
        let start = Instant::now();

        store.add_at("old", CachedValue::Present(vec![1]), start);
        store.add_at("new", CachedValue::Present(vec![2]), start + Duration::from_millis(80));

        let removed = store.reap_older_than(start + Duration::from_millis(150), INTERVAL);

        assert_eq!(removed, 1);
        assert_eq!(store.get("old"), Lookup::Miss);
        assert_eq!(store.get("new"), Lookup::Hit(vec![2]));
    }

    #[test]
    fn test_store_reap_keeps_entry_at_exact_interval() {
        let mut store = CacheStore::new();
        let start = Instant::now();

        store.add_at("edge", CachedValue::Absent, start);

        assert_eq!(store.reap_older_than(start + INTERVAL, INTERVAL), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_resets_age() {
        let mut store = CacheStore::new();
        let start = Instant::now();

        store.add_at("key", CachedValue::Present(vec![1]), start);
        store.add_at("key", CachedValue::Present(vec![2]), start + Duration::from_millis(90));

        // The first write would be stale here, the second is not
        let removed = store.reap_older_than(start + Duration::from_millis(150), INTERVAL);
        assert_eq!(removed, 0);
        assert_eq!(store.get("key"), Lookup::Hit(vec![2]));
    }

    #[test]
    fn test_store_get_does_not_refresh() {
        let mut store = CacheStore::new();
        let start = Instant::now();

        store.add_at("key", CachedValue::Present(vec![1]), start);
        // Reading repeatedly does not keep the entry alive
        for _ in 0..5 {
            store.get("key");
        }

        assert_eq!(store.reap_older_than(start + INTERVAL * 2, INTERVAL), 1);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();
        let start = Instant::now();

        store.add_at("key1", CachedValue::Present(vec![1]), start);
        store.add_at("key2", CachedValue::Absent, start);
        store.get("key1"); // hit
        store.get("key2"); // negative hit
        store.get("nonexistent"); // miss
        store.reap_older_than(start + INTERVAL * 2, INTERVAL);

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.negative_hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.insertions, 2);
        assert_eq!(stats.reaped, 2);
        assert_eq!(stats.reap_cycles, 1);
        assert_eq!(stats.total_entries, 0);
    }
}
