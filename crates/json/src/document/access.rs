//! Keyed, indexed and path access
//!
//! Writes auto-vivify: a key write on a non-object replaces the whole
//! document with a fresh object, an index write on a non-array replaces it
//! with `[null]` before assigning.

use super::{Document, raw};
use crate::collections::Object;
use crate::core::{Path, PathSegment, Value, ValueKind};
use crate::error::{ValueError, ValueResult};

#[track_caller]
fn forced<T>(result: ValueResult<T>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

impl Document {
    // ==================== Keys ====================

    /// Element under `key`; `None` if not an object or the key is missing
    pub fn get_key(&self, key: &str) -> Option<Document> {
        self.value.get_key(key).cloned().map(Document::from)
    }

    /// Element under `key`
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if not an object, `KeyNotFound` if the key is missing.
    pub fn try_key(&self, key: &str) -> ValueResult<Document> {
        let obj = self.value.try_object()?;
        obj.try_get(key).cloned().map(Document::from)
    }

    /// Element under `key`, for call sites that checked with [`exists`](Self::exists)
    ///
    /// # Panics
    ///
    /// Panics if not an object or the key is missing.
    #[track_caller]
    pub fn require_key(&self, key: &str) -> Document {
        forced(self.try_key(key))
    }

    /// Insert or overwrite `key`
    ///
    /// On anything but an object the document becomes `{key: value}`.
    pub fn set_key(&mut self, key: impl Into<String>, value: impl Into<Document>) {
        if !self.value.is_object() {
            self.vivify(ValueKind::Object);
        }
        let obj = self.value.as_object().cloned().unwrap_or_default();
        self.value = Value::Object(obj.insert(key, raw(value)));
    }

    /// Check if the document is an object holding `key`
    pub fn exists(&self, key: &str) -> bool {
        self.value
            .as_object()
            .is_some_and(|obj| obj.contains_key(key))
    }

    /// Object keys in ascending order; `None` if not an object
    pub fn keys(&self) -> Option<Vec<String>> {
        self.value.as_object().map(|obj| {
            let mut keys: Vec<String> = obj.keys().cloned().collect();
            keys.sort_unstable();
            keys
        })
    }

    /// Object keys in ascending order
    ///
    /// # Panics
    ///
    /// Panics if not an object.
    #[track_caller]
    pub fn require_keys(&self) -> Vec<String> {
        forced(
            self.keys()
                .ok_or_else(|| ValueError::shape_mismatch(ValueKind::Object, self.kind())),
        )
    }

    // ==================== Indices ====================

    /// Element at `index`; `None` if not an array or out of bounds
    pub fn get_index(&self, index: usize) -> Option<Document> {
        self.value.get_index(index).cloned().map(Document::from)
    }

    /// Element at `index`
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if not an array, `IndexOutOfBounds` past the end.
    pub fn try_index(&self, index: usize) -> ValueResult<Document> {
        let arr = self.value.try_array()?;
        arr.try_get(index).cloned().map(Document::from)
    }

    /// Element at `index`, for call sites that checked the bounds
    ///
    /// # Panics
    ///
    /// Panics if not an array or `index` is out of bounds.
    #[track_caller]
    pub fn require_index(&self, index: usize) -> Document {
        forced(self.try_index(index))
    }

    /// Overwrite the element at `index`
    ///
    /// On anything but an array the target is `[null]`, so only index 0
    /// can succeed there.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `index` is not an existing position. The
    /// document is left unchanged in that case.
    pub fn set_index(&mut self, index: usize, value: impl Into<Document>) -> ValueResult<()> {
        let mut target = self.clone();
        if !target.value.is_array() {
            target.vivify(ValueKind::Array);
        }
        let arr = target.value.try_array()?;
        self.value = Value::Array(arr.set(index, raw(value))?);
        Ok(())
    }

    // ==================== Paths ====================

    /// Element at a path such as `user.addresses[0].city`
    ///
    /// `None` when the path is malformed or does not resolve.
    pub fn get_path(&self, path: &str) -> Option<Document> {
        let path = Path::parse(path).ok()?;
        self.value.at_path(&path).cloned().map(Document::from)
    }

    /// Element at a path
    ///
    /// # Errors
    ///
    /// `InvalidPath` for a malformed path, otherwise the first segment
    /// failure with the resolved prefix as context.
    pub fn try_path(&self, path: &str) -> ValueResult<Document> {
        let path = Path::parse(path)?;
        self.value
            .try_at_path(&path)
            .cloned()
            .map(Document::from)
    }

    /// Write at a path, vivifying every container on the way
    ///
    /// ```
    /// use nebula_json::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.set_path("one.two[0].three", 3).unwrap();
    /// assert_eq!(doc.to_string(), r#"{"one":{"two":[{"three":3}]}}"#);
    /// ```
    ///
    /// # Errors
    ///
    /// `InvalidPath` for a malformed path, `IndexOutOfBounds` when an index
    /// segment is past the end of its array. The document is left unchanged
    /// on error.
    pub fn set_path(&mut self, path: &str, value: impl Into<Document>) -> ValueResult<()> {
        let path = Path::parse(path)?;
        self.value = write_at(&self.value, path.segments(), raw(value))?;
        Ok(())
    }
}

fn write_at(current: &Value, segments: &[PathSegment], value: Value) -> ValueResult<Value> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(value);
    };

    match segment {
        PathSegment::Key(key) => {
            let obj = match current {
                Value::Object(obj) => obj.clone(),
                other => {
                    tracing::trace!(from = %other.kind(), key = %key, "auto-vivifying object on path");
                    Object::new()
                }
            };
            let child = obj.get(key).cloned().unwrap_or_default();
            let child = write_at(&child, rest, value).map_err(|e| e.at_key(key.as_str()))?;
            Ok(Value::Object(obj.insert(key.as_str(), child)))
        }
        PathSegment::Index(index) => {
            let arr = match current {
                Value::Array(arr) => arr.clone(),
                other => {
                    tracing::trace!(from = %other.kind(), index, "auto-vivifying array on path");
                    [Value::Null].into_iter().collect()
                }
            };
            let child = arr.try_get(*index)?;
            let child = write_at(child, rest, value).map_err(|e| e.at_index(*index))?;
            Ok(Value::Array(arr.set(*index, child)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        text.parse().unwrap()
    }

    #[test]
    fn test_get_key() {
        let d = doc(r#"{"a": 1}"#);
        assert_eq!(d.get_key("a"), Some(Document::from(1)));
        assert_eq!(d.get_key("b"), None);
        assert_eq!(Document::array([1]).get_key("a"), None);
    }

    #[test]
    fn test_try_key_errors() {
        let d = doc(r#"{"a": 1}"#);
        assert_eq!(d.try_key("b").unwrap_err(), ValueError::key_not_found("b"));
        assert_eq!(
            Document::from(true).try_key("a").unwrap_err(),
            ValueError::shape_mismatch(ValueKind::Object, ValueKind::Bool)
        );
    }

    #[test]
    #[should_panic(expected = "Key not found: 'missing'")]
    fn test_require_key_panics() {
        doc("{}").require_key("missing");
    }

    #[test]
    fn test_set_key_on_null_vivifies() {
        let mut d = Document::new();
        d.set_key("k", "v");
        assert_eq!(d, doc(r#"{"k": "v"}"#));
    }

    #[test]
    fn test_set_key_on_array_discards_it() {
        let mut d = Document::array([1, 2]);
        d.set_key("k", 1);
        assert_eq!(d, doc(r#"{"k": 1}"#));
    }

    #[test]
    fn test_set_key_overwrites() {
        let mut d = doc(r#"{"a": 1, "b": 2}"#);
        d.set_key("a", None::<i32>);
        assert_eq!(d, doc(r#"{"a": null, "b": 2}"#));
    }

    #[test]
    fn test_exists_and_keys() {
        let d = doc(r#"{"b": 1, "a": 2}"#);
        assert!(d.exists("a"));
        assert!(!d.exists("c"));
        assert_eq!(d.keys(), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(Document::from(1).keys(), None);
        assert!(!Document::from(1).exists("a"));
    }

    #[test]
    #[should_panic(expected = "expected object")]
    fn test_require_keys_panics() {
        Document::empty_array().require_keys();
    }

    #[test]
    fn test_index_access() {
        let d = Document::array(["x", "y"]);
        assert_eq!(d.get_index(1), Some(Document::from("y")));
        assert_eq!(d.get_index(2), None);
        assert_eq!(
            d.try_index(2).unwrap_err(),
            ValueError::index_out_of_bounds(2, 2)
        );
        assert_eq!(d.require_index(0), Document::from("x"));
    }

    #[test]
    fn test_set_index() {
        let mut d = Document::array([1, 2]);
        d.set_index(1, "b").unwrap();
        assert_eq!(d, doc(r#"[1, "b"]"#));
        assert!(d.set_index(2, 0).is_err());
        assert_eq!(d, doc(r#"[1, "b"]"#));
    }

    #[test]
    fn test_set_index_vivifies_single_slot() {
        let mut d = Document::new();
        d.set_index(0, true).unwrap();
        assert_eq!(d, doc("[true]"));

        let mut d = Document::from("text");
        assert_eq!(
            d.set_index(1, true).unwrap_err(),
            ValueError::index_out_of_bounds(1, 1)
        );
        assert_eq!(d, Document::from("text"));
    }

    #[test]
    fn test_paths() {
        let d = doc(r#"{"user": {"tags": ["a", "b"]}}"#);
        assert_eq!(d.get_path("user.tags[1]"), Some(Document::from("b")));
        assert_eq!(d.get_path("$.user.tags[1]"), Some(Document::from("b")));
        assert_eq!(d.get_path("user.tags[9]"), None);
        assert_eq!(d.get_path("user..tags"), None);
        assert_eq!(
            d.try_path("user.tags[9]").unwrap_err().root(),
            &ValueError::index_out_of_bounds(9, 2)
        );
    }

    #[test]
    fn test_set_path_keeps_siblings() {
        let mut d = doc(r#"{"a": {"b": 1, "c": [0, 0]}}"#);
        d.set_path("a.c[1]", "x").unwrap();
        d.set_path("a.d", true).unwrap();
        assert_eq!(d, doc(r#"{"a": {"b": 1, "c": [0, "x"], "d": true}}"#));
    }

    #[test]
    fn test_set_path_out_of_bounds_leaves_document() {
        let mut d = doc(r#"{"a": [1]}"#);
        let err = d.set_path("a[3]", 0).unwrap_err();
        assert_eq!(err.root(), &ValueError::index_out_of_bounds(3, 1));
        assert_eq!(d, doc(r#"{"a": [1]}"#));
    }

    #[test]
    fn test_set_path_root_replaces() {
        let mut d = doc("[1]");
        d.set_path("$", "all").unwrap();
        assert_eq!(d, Document::from("all"));
    }
}
