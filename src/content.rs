//! Explicit-lifecycle content cache.
//!
//! Consumers construct a cache, pass it by reference, and invalidate it
//! when remote content changes. There is deliberately no module-scope
//! singleton; lifecycle is owned by the caller, so tests never leak
//! state into each other.

use std::collections::HashMap;
use std::hash::Hash;

/// A memoizing key-value cache with an explicit lifecycle.
#[derive(Debug, Clone)]
pub struct ContentCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> ContentCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Return the cached value for `key`, calling `fetch` to populate it
    /// on a miss. `fetch` runs at most once per key until invalidation.
    pub fn get_or_fetch<F>(&mut self, key: K, fetch: F) -> &V
    where
        F: FnOnce() -> V,
    {
        self.entries.entry(key).or_insert_with(fetch)
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for ContentCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
