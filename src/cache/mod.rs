//! Cache Module
//!
//! Provides an in-memory byte cache with interval-based expiry and a
//! background reaper.

mod entry;
mod stats;
mod store;
mod timed;


// Re-export public types
pub use entry::{CacheEntry, CachedValue, Lookup};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use timed::{TimedCache, MAX_INTERVAL, MIN_INTERVAL};

pub(crate) use timed::SharedStore;
