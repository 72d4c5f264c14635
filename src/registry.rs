//! Cache Registry
//!
//! One independent [`TimedCache`] per kind of cached lookup, built once at
//! startup and handed to whatever needs it.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::cache::{CacheStats, TimedCache};
use crate::config::Config;

// == Namespace ==
/// The kinds of lookup results kept in separate caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// Pages of a paginated listing, keyed by offset
    Listings,
    /// Per-location detail, keyed by location name
    Locations,
    /// Per-entity detail, keyed by entity name; includes negative results
    Entities,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [
        Namespace::Listings,
        Namespace::Locations,
        Namespace::Entities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Listings => "listings",
            Namespace::Locations => "locations",
            Namespace::Entities => "entities",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Cache Registry ==
/// Holds one cache per [`Namespace`], all sharing the same interval.
///
/// Cloning shares the underlying caches.
#[derive(Debug, Clone)]
pub struct CacheRegistry {
    listings: TimedCache,
    locations: TimedCache,
    entities: TimedCache,
}

impl CacheRegistry {
    /// Builds the three caches. Must be called inside a tokio runtime.
    pub fn new(interval: Duration) -> Self {
        Self {
            listings: TimedCache::new(interval),
            locations: TimedCache::new(interval),
            entities: TimedCache::new(interval),
        }
    }

    /// Builds the caches with the interval from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.interval())
    }

    /// Returns the cache for `namespace`.
    pub fn cache(&self, namespace: Namespace) -> &TimedCache {
        match namespace {
            Namespace::Listings => &self.listings,
            Namespace::Locations => &self.locations,
            Namespace::Entities => &self.entities,
        }
    }

    pub fn listings(&self) -> &TimedCache {
        &self.listings
    }

    pub fn locations(&self) -> &TimedCache {
        &self.locations
    }

    pub fn entities(&self) -> &TimedCache {
        &self.entities
    }

    /// Counters for each namespace, in [`Namespace::ALL`] order.
    pub fn stats(&self) -> Vec<(Namespace, CacheStats)> {
        Namespace::ALL
            .iter()
            .map(|ns| (*ns, self.cache(*ns).stats()))
            .collect()
    }

    /// Stops every reaper.
    pub fn shutdown(&self) {
        for ns in Namespace::ALL {
            self.cache(ns).shutdown();
        }
    }
}
