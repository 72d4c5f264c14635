//! Configuration Module
//!
//! Handles loading cache settings from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::{ConfigError, Result};

/// Environment variable holding the cache interval in milliseconds.
pub const INTERVAL_ENV: &str = "CACHE_INTERVAL_MS";

/// Default interval: five seconds.
pub const DEFAULT_INTERVAL_MS: u64 = 5_000;

/// Cache configuration parameters.
///
/// The same interval is used as the staleness threshold and the reap period
/// for every cache built from this config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Expiry window and reap period in milliseconds
    pub interval_ms: u64,
}

impl Config {
    /// Creates a Config from environment variables, falling back to defaults.
    ///
    /// Unparsable or zero values are logged and replaced by the default.
    ///
    /// # Environment Variables
    /// - `CACHE_INTERVAL_MS` - Interval in milliseconds (default: 5000)
    pub fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "Falling back to default cache configuration");
                Self::default()
            }
        }
    }

    /// Creates a Config from environment variables, rejecting bad values.
    ///
    /// Unset variables take their defaults.
    pub fn try_from_env() -> Result<Self> {
        let interval_ms = match env::var(INTERVAL_ENV) {
            Ok(raw) => parse_interval(&raw)?,
            Err(_) => DEFAULT_INTERVAL_MS,
        };

        Ok(Self { interval_ms })
    }

    /// The interval as a Duration.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

fn parse_interval(raw: &str) -> Result<u64> {
    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            var: INTERVAL_ENV.to_string(),
            value: raw.to_string(),
        })?;

    if value == 0 {
        return Err(ConfigError::ZeroInterval {
            var: INTERVAL_ENV.to_string(),
        });
    }
    Ok(value)
}
