//! LFU Tracker Module
//!
//! Implements Least Frequently Used tracking for cache eviction.
//!
//! Frequencies live in a map that is always authoritative. Every access also
//! pushes a `(count, key)` pair onto a min-heap; older pairs for the same key
//! are left behind as stale hints and skipped when eviction pops them.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, warn};

use crate::cache::policy::{CacheKey, EvictionPolicy, PolicyKind};
use crate::cache::DEFAULT_HEAP_FACTOR;

// == LFU Tracker ==
/// Tracks access counts for LFU eviction strategy.
///
/// Equal counts are ordered by key inside the heap. Callers should treat
/// ties as unordered.
#[derive(Debug)]
pub struct LfuTracker<K> {
    /// Current access count per resident key
    frequency: HashMap<K, u64>,
    /// Min-heap of `(count, key)`, possibly holding stale pairs
    heap: BinaryHeap<Reverse<(u64, K)>>,
    /// Heap is rebuilt once it exceeds this many pairs per live key
    heap_factor: usize,
}

impl<K: CacheKey> LfuTracker<K> {
    // == Constructor ==
    /// Creates a new empty LFU tracker with the default heap factor.
    pub fn new() -> Self {
        Self::with_heap_factor(DEFAULT_HEAP_FACTOR)
    }

    /// Creates a tracker whose heap may hold up to `heap_factor` pairs per
    /// live key before being compacted. A factor of 0 is treated as 1.
    pub fn with_heap_factor(heap_factor: usize) -> Self {
        Self {
            frequency: HashMap::new(),
            heap: BinaryHeap::new(),
            heap_factor: heap_factor.max(1),
        }
    }

    // == Frequency ==
    /// Returns the recorded access count of `key`, if tracked.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.frequency.get(key).copied()
    }

    /// Number of pairs in the heap, stale ones included.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    /// Rebuilds the heap from the frequency map once stale pairs pile up.
    fn maybe_compact(&mut self) {
        let limit = self.frequency.len().max(1).saturating_mul(self.heap_factor);
        if self.heap.len() <= limit {
            return;
        }

        debug!(
            heap_len = self.heap.len(),
            live = self.frequency.len(),
            "Compacting LFU heap"
        );
        self.heap = self
            .frequency
            .iter()
            .map(|(key, count)| Reverse((*count, key.clone())))
            .collect();
    }
}

impl<K: CacheKey> Default for LfuTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: CacheKey> EvictionPolicy<K> for LfuTracker<K> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }

    // == Record Access ==
    /// Bumps the key's count and pushes the new pair.
    fn record_access(&mut self, key: &K) {
        let count = self.frequency.entry(key.clone()).or_insert(0);
        *count += 1;
        let count = *count;
        self.heap.push(Reverse((count, key.clone())));
        self.maybe_compact();
    }

    // == Evict ==
    /// Pops until a pair matches its key's live count, then drops that key.
    fn evict(&mut self) -> Option<K> {
        while let Some(Reverse((count, key))) = self.heap.pop() {
            if self.frequency.get(&key) == Some(&count) {
                self.frequency.remove(&key);
                debug!(?key, count, "LFU victim selected");
                return Some(key);
            }
        }

        warn!("LFU heap exhausted without a live candidate");
        None
    }

    fn len(&self) -> usize {
        self.frequency.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.frequency.contains_key(key)
    }
}
