//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache lookups and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not resident in the cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Lookup was made without a key
    #[error("No key given")]
    MissingKey,

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    /// Builds a `NotFound` error from any displayable key.
    pub fn not_found<K: std::fmt::Display>(key: &K) -> Self {
        CacheError::NotFound(key.to_string())
    }

    /// True for both "no key" and "unknown key" lookups.
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::NotFound(_) | CacheError::MissingKey)
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
