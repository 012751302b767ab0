//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with a pluggable eviction policy.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::cache::{
    CacheKey, CacheStats, EvictionPolicy, LfuTracker, MruTracker, PolicyKind, DEFAULT_MAX_ITEMS,
    PREALLOC_LIMIT,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Bounded Cache ==
/// Fixed-capacity key/value store that evicts through its policy when full.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Eviction policy chosen at construction
    policy: Box<dyn EvictionPolicy<K>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K: CacheKey, V: Clone> BoundedCache<K, V> {
    // == Constructors ==
    /// Creates a cache of the default capacity using the given policy.
    pub fn new(kind: PolicyKind) -> Self {
        Self::with_capacity(kind, DEFAULT_MAX_ITEMS)
    }

    /// Creates an LFU cache of the default capacity.
    pub fn lfu() -> Self {
        Self::new(PolicyKind::Lfu)
    }

    /// Creates an MRU cache of the default capacity.
    pub fn mru() -> Self {
        Self::new(PolicyKind::Mru)
    }

    /// Creates a cache holding at most `capacity` entries (at least 1).
    pub fn with_capacity(kind: PolicyKind, capacity: usize) -> Self {
        let policy: Box<dyn EvictionPolicy<K>> = match kind {
            PolicyKind::Lfu => Box::new(LfuTracker::new()),
            PolicyKind::Mru => Box::new(MruTracker::with_capacity(capacity)),
        };
        Self::from_parts(policy, capacity)
    }

    /// Creates a cache around an already built policy.
    ///
    /// The policy must not track any keys yet, since the new cache holds none.
    pub fn with_policy(policy: Box<dyn EvictionPolicy<K>>, capacity: usize) -> Result<Self> {
        if !policy.is_empty() {
            return Err(CacheError::InvalidConfig(format!(
                "{} policy already tracks {} keys",
                policy.kind(),
                policy.len()
            )));
        }
        Ok(Self::from_parts(policy, capacity))
    }

    /// Creates a cache from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let policy: Box<dyn EvictionPolicy<K>> = match config.policy {
            PolicyKind::Lfu => Box::new(LfuTracker::with_heap_factor(config.heap_factor)),
            PolicyKind::Mru => Box::new(MruTracker::with_capacity(config.max_items)),
        };
        Ok(Self::from_parts(policy, config.max_items))
    }

    fn from_parts(policy: Box<dyn EvictionPolicy<K>>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity.min(PREALLOC_LIMIT)),
            stats: CacheStats::new(policy.kind(), capacity),
            policy,
            capacity,
        }
    }

    // == Put ==
    /// Stores a value when both key and value are present.
    ///
    /// Returns the key that was evicted to make room, if any. A missing key
    /// or value leaves the cache untouched.
    pub fn put(&mut self, key: Option<K>, value: Option<V>) -> Option<K> {
        match (key, value) {
            (Some(key), Some(value)) => self.insert(key, value),
            _ => {
                debug!("Ignoring put without key or value");
                self.stats.record_ignored_put();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a key-value pair, evicting one entry first if the cache is full
    /// and the key is new.
    ///
    /// Overwriting a resident key never evicts. Either way the access is
    /// recorded with the policy. If the policy cannot name a resident
    /// victim, the new key is dropped so the cache never exceeds capacity.
    pub fn insert(&mut self, key: K, value: V) -> Option<K> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            self.stats.record_overwrite();
            self.policy.record_access(&key);
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            match self.evict() {
                Some(victim) => Some(victim),
                None => {
                    warn!("No eviction candidate, dropping insert of {}", key);
                    return None;
                }
            }
        } else {
            None
        };

        self.entries.insert(key.clone(), value);
        self.policy.record_access(&key);
        self.stats.set_total_entries(self.entries.len());
        evicted
    }

    // == Get ==
    /// Retrieves a value by optional key.
    pub fn get(&mut self, key: Option<&K>) -> Result<V> {
        match key {
            Some(key) => self.lookup(key),
            None => {
                self.stats.record_miss();
                Err(CacheError::MissingKey)
            }
        }
    }

    // == Lookup ==
    /// Retrieves a value by key, recording the access on a hit.
    pub fn lookup(&mut self, key: &K) -> Result<V> {
        match self.entries.get(key) {
            Some(value) => {
                let value = value.clone();
                self.stats.record_hit();
                self.policy.record_access(key);
                Ok(value)
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::not_found(key))
            }
        }
    }

    /// Asks the policy for victims until one is resident, then drops it.
    fn evict(&mut self) -> Option<K> {
        while let Some(victim) = self.policy.evict() {
            if self.entries.remove(&victim).is_some() {
                self.stats.record_eviction();
                info!("DISCARD: {}", victim);
                return Some(victim);
            }
            warn!("Policy named {} which is not resident", victim);
        }
        None
    }

    // == Inspection ==
    /// Returns true if `key` is resident. Does not count as an access.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Policy this cache evicts with.
    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// All entries, sorted by key. Does not count as an access.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        let mut entries: Vec<(K, V)> = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    #[cfg(test)]
    pub(crate) fn policy_len(&self) -> usize {
        self.policy.len()
    }
}
