//! Error types for cache configuration
//!
//! Cache operations themselves are infallible; only loading settings can fail.

use thiserror::Error;

// == Config Error Enum ==
/// Errors raised while reading cache settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable is set but cannot be parsed
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },

    /// Interval must be strictly positive
    #[error("{var} must be greater than zero")]
    ZeroInterval { var: String },
}

// == Result Type Alias ==
/// Convenience Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
