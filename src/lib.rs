//! Policy Cache - A bounded in-memory key/value cache
//!
//! Provides a fixed-capacity cache with pluggable LFU and MRU eviction.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{BoundedCache, CacheStats, EvictionPolicy, PolicyKind, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
