//! Timed Cache Module
//!
//! The public cache handle: a mutex-guarded [`CacheStore`] shared with one
//! background reaper task that purges stale entries every interval.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::warn;

use crate::cache::{CacheStats, CacheStore, CachedValue, Lookup};
use crate::tasks::spawn_reaper_task;

// == Public Constants ==
/// Smallest interval a cache will run with. Shorter values are raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Largest interval a cache will run with. Longer values are lowered to this
/// so reap deadlines stay representable as an `Instant`.
pub const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// == Shared Store ==
/// State shared between cache handles and the reaper.
#[derive(Debug)]
pub(crate) struct SharedStore {
    store: Mutex<CacheStore>,
    interval: Duration,
}

impl SharedStore {
    fn new(interval: Duration) -> Self {
        Self {
            store: Mutex::new(CacheStore::new()),
            interval,
        }
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// Locks the store. The map only holds plain data, so a guard poisoned by
    /// a panicking holder is still consistent and is taken over.
    fn lock(&self) -> MutexGuard<'_, CacheStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Reap ==
    /// Runs one purge pass under the lock.
    ///
    /// Returns `(removed, remaining)`.
    pub(crate) fn reap(&self) -> (usize, usize) {
        let mut store = self.lock();
        let removed = store.reap_older_than(Instant::now(), self.interval);
        (removed, store.len())
    }
}

// == Reaper Lifecycle ==
/// Owns the shutdown signal for the reaper. Dropped with the last handle,
/// which closes the channel and lets the reaper exit.
#[derive(Debug)]
struct ReaperLifecycle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

// == Timed Cache ==
/// A string-keyed byte cache whose entries are purged once they are older
/// than the configured interval.
///
/// Cloning is cheap and every clone shares the same entries and reaper.
/// Reads never extend an entry's lifetime, so an entry lives between one and
/// two intervals depending on where it lands relative to the reap timer.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// use std::time::Duration;
/// use timed_cache::{Lookup, TimedCache};
///
/// let cache = TimedCache::new(Duration::from_secs(5));
/// cache.add("offset:20", b"canalave-city-area".to_vec());
/// assert!(matches!(cache.get("offset:20"), Lookup::Hit(_)));
/// # }
/// ```
#[derive(Clone)]
pub struct TimedCache {
    shared: Arc<SharedStore>,
    lifecycle: Arc<ReaperLifecycle>,
}

impl TimedCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current tokio runtime.
    ///
    /// The first reap fires `interval` after construction. The interval is
    /// clamped to [`MIN_INTERVAL`]..=[`MAX_INTERVAL`].
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime, like `tokio::spawn`.
    pub fn new(interval: Duration) -> Self {
        Self::with_runtime(interval, &Handle::current())
    }

    /// Creates an empty cache whose reaper runs on `runtime`.
    pub fn with_runtime(interval: Duration, runtime: &Handle) -> Self {
        let interval = if interval < MIN_INTERVAL {
            warn!(
                requested_ms = interval.as_millis() as u64,
                "Cache interval below minimum, using {:?}", MIN_INTERVAL
            );
            MIN_INTERVAL
        } else if interval > MAX_INTERVAL {
            warn!(
                requested_secs = interval.as_secs(),
                "Cache interval above maximum, using {:?}", MAX_INTERVAL
            );
            MAX_INTERVAL
        } else {
            interval
        };

        let shared = Arc::new(SharedStore::new(interval));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = spawn_reaper_task(runtime, Arc::clone(&shared), shutdown_rx);

        Self {
            shared,
            lifecycle: Arc::new(ReaperLifecycle { shutdown_tx, task }),
        }
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, resetting its age to zero.
    ///
    /// Pass `CachedValue::Absent` (or `None::<Vec<u8>>`) to remember a
    /// negative result.
    pub fn add(&self, key: impl Into<String>, value: impl Into<CachedValue>) {
        let key = key.into();
        let value = value.into();
        self.shared.lock().add(key, value);
    }

    // == Get ==
    /// Looks up `key`. Never refreshes the entry.
    pub fn get(&self, key: &str) -> Lookup {
        self.shared.lock().get(key)
    }

    /// Staleness threshold and reap period.
    pub fn interval(&self) -> Duration {
        self.shared.interval()
    }

    /// Number of entries held, including stale ones not yet reaped.
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.lock().is_empty()
    }

    /// Snapshot of this cache's counters.
    pub fn stats(&self) -> CacheStats {
        self.shared.lock().stats()
    }

    // == Shutdown ==
    /// Stops the reaper. Entries stay readable and writable but are no longer
    /// purged. Calling it again has no effect.
    ///
    /// Without this call the reaper runs until every handle is dropped.
    pub fn shutdown(&self) {
        self.lifecycle.shutdown_tx.send_replace(true);
    }

    /// Returns true once the reaper task has exited.
    pub fn is_reaper_finished(&self) -> bool {
        self.lifecycle.task.is_finished()
    }
}

impl fmt::Debug for TimedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedCache")
            .field("interval", &self.interval())
            .field("entries", &self.len())
            .finish()
    }
}
