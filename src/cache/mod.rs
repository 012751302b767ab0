//! Cache Module
//!
//! Provides a bounded in-memory cache with LFU and MRU eviction.

mod lfu;
mod mru;
mod policy;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use lfu::LfuTracker;
pub use mru::MruTracker;
pub use policy::{CacheKey, EvictionPolicy, PolicyKind};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::BoundedCache;

// == Public Constants ==
/// Capacity used when none is given
pub const DEFAULT_MAX_ITEMS: usize = 4;

/// Upper bound on storage reserved up front; larger caches grow on demand
pub(crate) const PREALLOC_LIMIT: usize = 1024;

/// Stale LFU heap pairs tolerated per live key before compaction
pub const DEFAULT_HEAP_FACTOR: usize = 8;
