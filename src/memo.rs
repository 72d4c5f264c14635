//! Fetch-Through Memoization
//!
//! The lookup flow callers run against a cache before doing slow remote work.

use std::future::Future;

use tracing::debug;

use crate::cache::{CachedValue, TimedCache};

/// Returns the cached value for `key`, or runs `fetch` and caches its result.
///
/// `fetch` resolves to:
/// - `Ok(Some(bytes))` - cached as a payload and returned
/// - `Ok(None)` - cached as a negative result and returned as `Absent`
/// - `Err(e)` - returned as-is; nothing is cached, so the next call retries
///
/// The cache lock is not held while `fetch` runs. Two callers missing on the
/// same key at once will both fetch; the later `add` wins.
pub async fn fetch_through<F, Fut, E>(
    cache: &TimedCache,
    key: &str,
    fetch: F,
) -> Result<CachedValue, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<Vec<u8>>, E>>,
{
    if let Some(value) = cache.get(key).into_value() {
        debug!(key, negative = value.is_absent(), "Cache hit");
        return Ok(value);
    }

    debug!(key, "Cache miss, fetching");
    let value = CachedValue::from(fetch().await?);
    if value.is_absent() {
        debug!(key, "Caching negative result");
    }
    cache.add(key, value.clone());
    Ok(value)
}
