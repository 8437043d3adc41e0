//! Array type for nebula-json
//!
//! Backed by `im::Vector`: every edit returns a new array that shares
//! structure with the old one.

use std::hash::{Hash, Hasher};

use im::Vector;

use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};

/// Persistent array with efficient structural sharing
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Array {
    inner: Vector<Value>,
}

impl Array {
    /// Create an empty array
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Vector::new(),
        }
    }

    /// Create from a Vec
    #[must_use]
    pub fn from_vec(vec: Vec<Value>) -> Self {
        Self {
            inner: Vector::from(vec),
        }
    }

    /// Get the length
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

    /// Get element at index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.inner.get(index)
    }

    /// Get element at index or error
    ///
    /// # Errors
    ///
    /// Returns `ValueError::IndexOutOfBounds` if `index >= len()`
    pub fn try_get(&self, index: usize) -> ValueResult<&Value> {
        self.get(index)
            .ok_or_else(|| ValueError::index_out_of_bounds(index, self.len()))
    }

    /// Push an element (returns new Array, original unchanged)
    #[must_use = "immutable methods return a new instance"]
    pub fn push(&self, value: impl Into<Value>) -> Self {
        let mut new_vec = self.inner.clone();
        new_vec.push_back(value.into());
        Self { inner: new_vec }
    }

    /// Set element at index (returns new Array)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::IndexOutOfBounds` if `index >= len()`
    pub fn set(&self, index: usize, value: impl Into<Value>) -> ValueResult<Self> {
        if index >= self.len() {
            return Err(ValueError::index_out_of_bounds(index, self.len()));
        }

        let mut new_vec = self.inner.clone();
        new_vec.set(index, value.into());
        Ok(Self { inner: new_vec })
    }

    /// Insert element at index (returns new Array)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::IndexOutOfBounds` if `index > len()`
    pub fn insert(&self, index: usize, value: impl Into<Value>) -> ValueResult<Self> {
        if index > self.len() {
            return Err(ValueError::index_out_of_bounds(index, self.len()));
        }

        let mut new_vec = self.inner.clone();
        new_vec.insert(index, value.into());
        Ok(Self { inner: new_vec })
    }

    /// Insert every element of `other` starting at `index` (returns new Array)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::IndexOutOfBounds` if `index > len()`
    pub fn splice(&self, index: usize, other: &Array) -> ValueResult<Self> {
        if index > self.len() {
            return Err(ValueError::index_out_of_bounds(index, self.len()));
        }

        let mut head = self.inner.clone();
        let tail = head.split_off(index);
        head.append(other.inner.clone());
        head.append(tail);
        Ok(Self { inner: head })
    }

    /// Remove element at index (returns new Array and removed value)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::IndexOutOfBounds` if `index >= len()`
    pub fn remove(&self, index: usize) -> ValueResult<(Self, Value)> {
        if index >= self.len() {
            return Err(ValueError::index_out_of_bounds(index, self.len()));
        }

        let mut new_vec = self.inner.clone();
        let removed = new_vec.remove(index);
        Ok((Self { inner: new_vec }, removed))
    }

    /// Concatenate with another array
    #[must_use = "immutable methods return a new instance"]
    pub fn concat(&self, other: &Array) -> Self {
        let mut new_vec = self.inner.clone();
        new_vec.append(other.inner.clone());
        Self { inner: new_vec }
    }

    /// Create iterator
    pub fn iter(&self) -> im::vector::Iter<'_, Value> {
        self.inner.iter()
    }
}

impl Hash for Array {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for item in &self.inner {
            item.hash(state);
        }
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

// ==================== IntoIterator ====================

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = im::vector::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Array {
        values.iter().copied().map(Value::number).collect()
    }

    #[test]
    fn test_array_creation() {
        let arr = Array::new();
        assert_eq!(arr.len(), 0);
        assert!(arr.is_empty());
    }

    #[test]
    fn test_array_push_structural_sharing() {
        let arr1 = numbers(&[1.0, 2.0]);
        let arr2 = arr1.push(Value::number(3.0));

        assert_eq!(arr1.len(), 2);
        assert_eq!(arr2.len(), 3);
        assert_eq!(arr2.get(2), Some(&Value::number(3.0)));
    }

    #[test]
    fn test_array_set_out_of_bounds() {
        let arr = numbers(&[1.0]);
        assert!(arr.set(0, Value::Bool(true)).is_ok());
        assert_eq!(
            arr.set(1, Value::Null),
            Err(ValueError::index_out_of_bounds(1, 1))
        );
    }

    #[test]
    fn test_array_insert_at_end_is_allowed() {
        let arr = numbers(&[1.0, 2.0]);
        let arr = arr.insert(2, Value::number(3.0)).unwrap();
        assert_eq!(arr, numbers(&[1.0, 2.0, 3.0]));
        assert!(arr.insert(5, Value::Null).is_err());
    }

    #[test]
    fn test_array_splice() {
        let arr = numbers(&[1.0, 4.0]);
        let spliced = arr.splice(1, &numbers(&[2.0, 3.0])).unwrap();
        assert_eq!(spliced, numbers(&[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn test_array_remove() {
        let arr = numbers(&[1.0, 2.0, 3.0]);
        let (rest, removed) = arr.remove(1).unwrap();
        assert_eq!(removed, Value::number(2.0));
        assert_eq!(rest, numbers(&[1.0, 3.0]));
        assert!(arr.remove(3).is_err());
    }
}
