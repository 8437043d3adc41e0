//! Object (key-value map) type for nebula-json
//!
//! Backed by `im::HashMap`, so edits return a new map sharing structure
//! with the old one.
//!
//! Iteration order is unspecified. Callers that need a stable order sort
//! the keys (see [`Object::sorted_entries`]).

use std::hash::{Hash, Hasher};

use im::HashMap;

use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};

/// Persistent key-value map with efficient structural sharing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    inner: HashMap<String, Value>,
}

impl Object {
    /// Create an empty object
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Get the number of keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Get value by key or error
    ///
    /// # Errors
    ///
    /// Returns `ValueError::KeyNotFound` if the key is absent
    pub fn try_get(&self, key: &str) -> ValueResult<&Value> {
        self.get(key).ok_or_else(|| ValueError::key_not_found(key))
    }

    /// Check if key exists
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Insert key-value pair (returns new Object, original unchanged)
    #[must_use = "immutable methods return a new instance"]
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut new_map = self.inner.clone();
        new_map.insert(key.into(), value.into());
        Self { inner: new_map }
    }

    /// Remove key (returns new Object and removed value)
    #[must_use]
    pub fn remove(&self, key: &str) -> Option<(Self, Value)> {
        let mut new_map = self.inner.clone();
        new_map
            .remove(key)
            .map(|val| (Self { inner: new_map }, val))
    }

    /// Get all keys
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }

    /// Get all entries
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }

    /// Entries ordered by key
    pub fn sorted_entries(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = self.inner.iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }

    /// Merge with another object (right wins on conflicts)
    #[must_use = "immutable methods return a new instance"]
    pub fn merge(&self, other: &Object) -> Self {
        self.merge_with(other, |_, right| right.clone())
    }

    /// Merge with another object, resolving colliding keys with `resolve`
    ///
    /// The union is shallow: `resolve` receives the left and right values
    /// of a colliding key and its result replaces both.
    #[must_use = "immutable methods return a new instance"]
    pub fn merge_with<F>(&self, other: &Object, mut resolve: F) -> Self
    where
        F: FnMut(&Value, &Value) -> Value,
    {
        let mut new_map = self.inner.clone();
        for (key, right) in &other.inner {
            let merged = match new_map.get(key) {
                Some(left) => resolve(left, right),
                None => right.clone(),
            };
            new_map.insert(key.clone(), merged);
        }
        Self { inner: new_map }
    }
}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash keys in sorted order for deterministic hashing
        self.len().hash(state);
        for (key, value) in self.sorted_entries() {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
