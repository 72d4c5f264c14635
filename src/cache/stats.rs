//! Cache Statistics Module
//!
//! Tracks lookup outcomes, insertions, and reaper activity.

use serde::Serialize;

// == Cache Stats ==
/// Counters for one cache instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a payload
    pub hits: u64,
    /// Lookups that found a cached negative result
    pub negative_hits: u64,
    /// Lookups for keys not in the cache
    pub misses: u64,
    /// Calls to `add`, overwrites included
    pub insertions: u64,
    /// Entries removed by the reaper
    pub reaped: u64,
    /// Completed reap cycles
    pub reap_cycles: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of lookups that found the key, negative hits included.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let found = self.hits + self.negative_hits;
        let total = found + self.misses;
        if total == 0 {
            0.0
        } else {
            found as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_negative_hit(&mut self) {
        self.negative_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    // == Record Reap ==
    /// Counts one finished reap cycle and the entries it removed.
    pub fn record_reap(&mut self, removed: usize) {
        self.reap_cycles += 1;
        self.reaped += removed as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
