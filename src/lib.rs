//! Timed Cache - an in-memory cache for memoizing slow lookups
//!
//! Entries expire on a fixed interval: a background reaper purges anything
//! older than the interval once per interval. There is no size bound and no
//! eviction policy beyond age.

pub mod cache;
pub mod config;
pub mod error;
pub mod memo;
pub mod registry;
mod tasks;

pub use cache::{CacheStats, CachedValue, Lookup, TimedCache};
pub use config::Config;
pub use error::ConfigError;
pub use memo::fetch_through;
pub use registry::{CacheRegistry, Namespace};
