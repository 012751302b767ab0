//! Eviction Policy Module
//!
//! The capability every eviction strategy implements, plus the key bound
//! shared by the cache and its policies.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Cache Key ==
/// Bound satisfied by every usable cache key.
///
/// `Ord` is required so the LFU heap can order `(count, key)` pairs, and
/// `Display` renders the key in discard notifications.
pub trait CacheKey:
    Eq + Hash + Ord + Clone + fmt::Debug + fmt::Display + Send + 'static
{
}

impl<T> CacheKey for T where
    T: Eq + Hash + Ord + Clone + fmt::Debug + fmt::Display + Send + 'static
{
}

// == Policy Kind ==
/// Selects which eviction policy a cache is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Least frequently used
    Lfu,
    /// Most recently used
    Mru,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Lfu => f.write_str("lfu"),
            PolicyKind::Mru => f.write_str("mru"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lfu" => Ok(PolicyKind::Lfu),
            "mru" => Ok(PolicyKind::Mru),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown eviction policy '{}'",
                other
            ))),
        }
    }
}

// == Eviction Policy ==
/// Bookkeeping hooks a [`BoundedCache`](crate::cache::BoundedCache) drives.
///
/// The cache owns the values; a policy only tracks keys. It is told about
/// every access and, when the cache is full, asked to give up one key.
pub trait EvictionPolicy<K>: fmt::Debug + Send {
    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// Records a put (insert or overwrite) or a successful get of `key`.
    fn record_access(&mut self, key: &K);

    /// Chooses a resident key to evict and stops tracking it.
    ///
    /// Returns `None` when nothing is tracked.
    fn evict(&mut self) -> Option<K>;

    /// Number of keys currently tracked.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` is currently tracked.
    fn contains(&self, key: &K) -> bool;
}
