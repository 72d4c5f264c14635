//! Cache Entry Module
//!
//! Defines stored entries, the tagged value they carry, and the result of a lookup.

use std::time::Duration;

use tokio::time::Instant;

// == Cached Value ==
/// A payload held by the cache.
///
/// `Absent` records a confirmed negative result (e.g. the remote side
/// answered "not found"), which is different from the key not being cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    /// A stored payload. May be empty.
    Present(Vec<u8>),
    /// A cached "no result exists".
    Absent,
}

impl CachedValue {
    /// Returns the payload bytes, or `None` for a negative result.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CachedValue::Present(bytes) => Some(bytes),
            CachedValue::Absent => None,
        }
    }

    /// Returns true if this is a cached negative result.
    pub fn is_absent(&self) -> bool {
        matches!(self, CachedValue::Absent)
    }
}

impl From<Vec<u8>> for CachedValue {
    fn from(bytes: Vec<u8>) -> Self {
        CachedValue::Present(bytes)
    }
}

impl From<&[u8]> for CachedValue {
    fn from(bytes: &[u8]) -> Self {
        CachedValue::Present(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for CachedValue {
    fn from(bytes: [u8; N]) -> Self {
        CachedValue::Present(bytes.to_vec())
    }
}

impl From<Option<Vec<u8>>> for CachedValue {
    fn from(bytes: Option<Vec<u8>>) -> Self {
        match bytes {
            Some(bytes) => CachedValue::Present(bytes),
            None => CachedValue::Absent,
        }
    }
}

// == Lookup ==
/// Outcome of reading a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Key is cached with a payload.
    Hit(Vec<u8>),
    /// Key is cached as a negative result.
    NegativeHit,
    /// Key is not in the cache (never added, or already reaped).
    Miss,
}

impl Lookup {
    /// Returns true for both `Hit` and `NegativeHit`.
    pub fn found(&self) -> bool {
        !matches!(self, Lookup::Miss)
    }

    /// Converts a found lookup back into the value that was stored.
    pub fn into_value(self) -> Option<CachedValue> {
        match self {
            Lookup::Hit(bytes) => Some(CachedValue::Present(bytes)),
            Lookup::NegativeHit => Some(CachedValue::Absent),
            Lookup::Miss => None,
        }
    }
}

impl From<&CachedValue> for Lookup {
    fn from(value: &CachedValue) -> Self {
        match value {
            CachedValue::Present(bytes) => Lookup::Hit(bytes.clone()),
            CachedValue::Absent => Lookup::NegativeHit,
        }
    }
}

// == Cache Entry ==
/// A single stored value and the moment it was inserted.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: CachedValue,
    /// Insertion time (monotonic)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry inserted at `created_at`.
    pub fn at(value: CachedValue, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Time elapsed between insertion and `now`. Saturates at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `interval` at `now`.
    ///
    /// Boundary condition: an entry whose age equals `interval` exactly is
    /// still fresh; it only becomes stale once its age strictly exceeds it.
    pub fn is_stale(&self, now: Instant, interval: Duration) -> bool {
        self.age(now) > interval
    }
}
