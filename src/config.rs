//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;

use crate::cache::{PolicyKind, DEFAULT_HEAP_FACTOR, DEFAULT_MAX_ITEMS};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_items: usize,
    /// Eviction policy used by the cache
    pub policy: PolicyKind,
    /// LFU heap is rebuilt once it holds more than `heap_factor` pairs per live key
    pub heap_factor: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ITEMS` - Maximum cache entries (default: 4)
    /// - `CACHE_POLICY` - `lfu` or `mru` (default: lfu)
    /// - `LFU_HEAP_FACTOR` - Stale heap pairs tolerated per live key (default: 8)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_items: lookup("MAX_ITEMS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_items),
            policy: lookup("CACHE_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.policy),
            heap_factor: lookup("LFU_HEAP_FACTOR")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.heap_factor),
        }
    }

    /// Rejects values the cache cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_items == 0 {
            return Err(CacheError::InvalidConfig(
                "max_items must be at least 1".to_string(),
            ));
        }
        if self.heap_factor == 0 {
            return Err(CacheError::InvalidConfig(
                "heap_factor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            policy: PolicyKind::Lfu,
            heap_factor: DEFAULT_HEAP_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_items, 4);
        assert_eq!(config.policy, PolicyKind::Lfu);
        assert_eq!(config.heap_factor, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_lookup_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MAX_ITEMS", "10"),
            ("CACHE_POLICY", "MRU"),
            ("LFU_HEAP_FACTOR", "3"),
        ]));
        assert_eq!(config.max_items, 10);
        assert_eq!(config.policy, PolicyKind::Mru);
        assert_eq!(config.heap_factor, 3);
    }

    #[test]
    fn test_config_unparsable_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("MAX_ITEMS", "lots"),
            ("CACHE_POLICY", "fifo"),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_validate_rejects_zero() {
        let config = Config {
            max_items: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));

        let config = Config {
            heap_factor: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_no_variables_gives_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_accepts_huge_capacity() {
        let max = usize::MAX.to_string();
        let config = Config::from_lookup(lookup_from(&[("MAX_ITEMS", max.as_str())]));
        assert_eq!(config.max_items, usize::MAX);
        assert!(config.validate().is_ok());
    }
}
