//! Shared Cache Module
//!
//! Thread-safe handle around a [`BoundedCache`]. Every call holds one lock
//! for its whole duration, so map, policy and eviction updates never
//! interleave.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::cache::{BoundedCache, CacheKey, CacheStats, PolicyKind};
use crate::config::Config;
use crate::error::Result;

/// Cloneable, thread-safe cache handle.
///
/// Contains the cache wrapped in `Arc<Mutex<>>`.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<BoundedCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: CacheKey, V: Clone> SharedCache<K, V> {
    /// Wraps an existing cache.
    pub fn new(cache: BoundedCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Builds the wrapped cache from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(BoundedCache::from_config(config)?))
    }

    // Poisoning is ignored so every call stays total.
    fn lock(&self) -> MutexGuard<'_, BoundedCache<K, V>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // == Put / Get ==
    /// See [`BoundedCache::put`].
    pub fn put(&self, key: Option<K>, value: Option<V>) -> Option<K> {
        self.lock().put(key, value)
    }

    /// See [`BoundedCache::get`].
    pub fn get(&self, key: Option<&K>) -> Result<V> {
        self.lock().get(key)
    }

    /// See [`BoundedCache::insert`].
    pub fn insert(&self, key: K, value: V) -> Option<K> {
        self.lock().insert(key, value)
    }

    /// See [`BoundedCache::lookup`].
    pub fn lookup(&self, key: &K) -> Result<V> {
        self.lock().lookup(key)
    }

    // == Inspection ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Policy the wrapped cache evicts with.
    pub fn policy_kind(&self) -> PolicyKind {
        self.lock().policy_kind()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    /// All entries, sorted by key. Does not count as an access.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.lock().snapshot()
    }
}
