//! Cache Statistics Module
//!
//! Counts what the cache has done: hits, misses, evictions, overwrites and
//! puts that were ignored for lack of a key or value.

use serde::Serialize;

use crate::cache::PolicyKind;

// == Cache Stats ==
/// Snapshot of cache counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Active eviction policy
    pub policy: PolicyKind,
    /// Maximum number of entries
    pub capacity: usize,
    /// Lookups that found their key
    pub hits: u64,
    /// Lookups with no key or an unknown key
    pub misses: u64,
    /// Entries discarded to make room
    pub evictions: u64,
    /// Puts that replaced the value of a resident key
    pub overwrites: u64,
    /// Puts dropped because key or value was absent
    pub ignored_puts: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates zeroed stats for a cache of the given policy and capacity.
    pub fn new(policy: PolicyKind, capacity: usize) -> Self {
        Self {
            policy,
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
            overwrites: 0,
            ignored_puts: 0,
            total_entries: 0,
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_overwrite(&mut self) {
        self.overwrites += 1;
    }

    pub(crate) fn record_ignored_put(&mut self) {
        self.ignored_puts += 1;
    }

    pub(crate) fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
