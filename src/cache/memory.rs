//! In-Memory Cache
//!
//! `BTreeMap`-backed [`CacheAdapter`] for demos and tests. Values live only
//! as long as the process.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{CacheAdapter, CacheError};

/// In-memory cache adapter.
#[derive(Debug, Default)]
pub struct MemoryCache {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl CacheAdapter for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent_key() {
        let cache = MemoryCache::new();
        assert!(cache.get("username").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let cache = MemoryCache::new();
        cache.set("username", "Antje").unwrap();
        assert_eq!(cache.get("username").as_deref(), Some("Antje"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let cache = MemoryCache::new();
        cache.set("sessionId", "g1").unwrap();
        cache.set("sessionId", "g2").unwrap();
        assert_eq!(cache.get("sessionId").as_deref(), Some("g2"));
        assert_eq!(cache.len(), 1);
    }
}
