//! MRU Tracker Module
//!
//! Implements Most Recently Used tracking for cache eviction.
//!
//! Keys sit in a doubly-linked list whose nodes live in a slot arena and link
//! to each other by slot index. A map from key to slot gives O(1)
//! move-to-front and O(1) removal.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::policy::{CacheKey, EvictionPolicy, PolicyKind};
use crate::cache::PREALLOC_LIMIT;

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == MRU Tracker ==
/// Tracks access order for MRU eviction strategy.
///
/// - Head = Most recently used (evicted first)
/// - Tail = Least recently used
#[derive(Debug)]
pub struct MruTracker<K> {
    /// Node storage; `None` marks a free slot
    slots: Vec<Option<Node<K>>>,
    /// Free slot indices available for reuse
    free: Vec<usize>,
    /// Key to slot lookup
    index: HashMap<K, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K: CacheKey> MruTracker<K> {
    // == Constructor ==
    /// Creates a new empty MRU tracker.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates a tracker with room for `capacity` keys.
    ///
    /// Reservation is capped; the tracker grows past it on demand.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(PREALLOC_LIMIT);
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            index: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    // == Peek ==
    /// Returns the most recently used key without removing it.
    pub fn peek_newest(&self) -> Option<&K> {
        self.node(self.head?).map(|node| &node.key)
    }

    /// Returns the least recently used key.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.node(self.tail?).map(|node| &node.key)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.index.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(node) = self.node(id) else { break };
            keys.push(&node.key);
            cursor = node.next;
        }
        keys
    }

    fn node(&self, id: usize) -> Option<&Node<K>> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: usize) -> Option<&mut Node<K>> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    fn allocate(&mut self, key: K) -> usize {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Unlinks a node, leaving it in its slot.
    fn detach(&mut self, id: usize) {
        let Some((prev, next)) = self.node(id).map(|node| (node.prev, node.next)) else {
            return;
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.node_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, id: usize) {
        let old_head = self.head;
        match self.node_mut(id) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            }
            None => return,
        }

        match old_head {
            Some(old_id) => {
                if let Some(old_node) = self.node_mut(old_id) {
                    old_node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    #[cfg(test)]
    fn validate_links(&self) {
        let forward: Vec<&K> = self.keys();
        assert_eq!(forward.len(), self.index.len());

        let mut backward = Vec::new();
        let mut cursor = self.tail;
        while let Some(id) = cursor {
            let node = self.node(id).expect("linked slot must be occupied");
            backward.push(&node.key);
            cursor = node.prev;
        }
        backward.reverse();
        assert_eq!(forward, backward);

        for (key, id) in &self.index {
            assert_eq!(&self.node(*id).expect("indexed slot").key, key);
        }
    }
}

impl<K: CacheKey> Default for MruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: CacheKey> EvictionPolicy<K> for MruTracker<K> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Mru
    }

    // == Record Access ==
    /// Moves the key to the head, inserting it if new.
    fn record_access(&mut self, key: &K) {
        if let Some(&id) = self.index.get(key) {
            if self.head != Some(id) {
                self.detach(id);
                self.attach_front(id);
            }
            return;
        }

        let id = self.allocate(key.clone());
        self.index.insert(key.clone(), id);
        self.attach_front(id);
    }

    // == Evict ==
    /// Removes and returns the most recently used key.
    fn evict(&mut self) -> Option<K> {
        let id = self.head?;
        self.detach(id);
        let node = self.slots.get_mut(id)?.take()?;
        self.free.push(id);
        self.index.remove(&node.key);
        debug!(key = ?node.key, "MRU victim selected");
        Some(node.key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mru_new() {
        let mru: MruTracker<String> = MruTracker::new();
        assert!(mru.is_empty());
        assert_eq!(mru.peek_newest(), None);
        assert_eq!(mru.kind(), PolicyKind::Mru);
    }

    #[test]
    fn test_mru_touch_new_keys() {
        let mut mru = MruTracker::new();

        mru.record_access(&"a");
        mru.record_access(&"b");
        mru.record_access(&"c");

        assert_eq!(mru.len(), 3);
        assert_eq!(mru.peek_newest(), Some(&"c"));
        assert_eq!(mru.peek_oldest(), Some(&"a"));
        mru.validate_links();
    }

    #[test]
    fn test_mru_touch_existing_moves_to_front() {
        let mut mru = MruTracker::new();

        mru.record_access(&"a");
        mru.record_access(&"b");
        mru.record_access(&"c");
        mru.record_access(&"a");

        assert_eq!(mru.len(), 3);
        assert_eq!(mru.keys(), vec![&"a", &"c", &"b"]);
        mru.validate_links();
    }

    #[test]
    fn test_mru_evicts_newest() {
        let mut mru = MruTracker::new();

        mru.record_access(&"a");
        mru.record_access(&"b");
        mru.record_access(&"c");
        mru.record_access(&"b");

        assert_eq!(mru.evict(), Some("b"));
        assert_eq!(mru.evict(), Some("c"));
        assert_eq!(mru.evict(), Some("a"));
        assert_eq!(mru.evict(), None);
        mru.validate_links();
    }

    #[test]
    fn test_mru_touch_same_key_multiple_times() {
        let mut mru = MruTracker::new();

        mru.record_access(&"a");
        mru.record_access(&"a");
        mru.record_access(&"a");

        assert_eq!(mru.len(), 1);
        assert_eq!(mru.evict(), Some("a"));
        assert!(mru.is_empty());
    }

    #[test]
    fn test_mru_reuses_freed_slots() {
        let mut mru = MruTracker::with_capacity(2);

        mru.record_access(&1);
        mru.record_access(&2);
        assert_eq!(mru.evict(), Some(2));
        mru.record_access(&3);
        assert_eq!(mru.evict(), Some(3));
        mru.record_access(&4);

        assert_eq!(mru.slots.len(), 2);
        assert_eq!(mru.keys(), vec![&4, &1]);
        mru.validate_links();
    }

    #[test]
    fn test_mru_with_huge_capacity() {
        let mut mru = MruTracker::with_capacity(usize::MAX);
        assert!(mru.slots.capacity() <= 4 * PREALLOC_LIMIT);
        assert!(mru.index.capacity() <= 4 * PREALLOC_LIMIT);

        mru.record_access(&7u64);
        assert_eq!(mru.evict(), Some(7));
    }

    #[test]
    fn test_mru_touch_tail_relinks() {
        let mut mru = MruTracker::new();

        for key in ["a", "b", "c", "d"] {
            mru.record_access(&key);
        }
        // "a" is the tail; moving it must update the tail pointer
        mru.record_access(&"a");

        assert_eq!(mru.peek_oldest(), Some(&"b"));
        assert_eq!(mru.peek_newest(), Some(&"a"));
        mru.validate_links();
    }
}
