//! Object merge and key removal

use std::collections::HashMap;

use serde::Serialize;

use super::Document;
use crate::core::Value;
use crate::error::ValueResult;

impl Document {
    /// Shallow union with `other`, right side winning on shared keys
    ///
    /// `None` unless both documents are objects. Nested objects under a
    /// shared key are replaced, not merged.
    ///
    /// ```
    /// use nebula_json::Document;
    ///
    /// let left: Document = r#"{"a": 1, "b": 2}"#.parse().unwrap();
    /// let right: Document = r#"{"a": false, "e": 5}"#.parse().unwrap();
    /// let merged = left.merging(&right).unwrap();
    /// assert_eq!(merged, r#"{"a": false, "b": 2, "e": 5}"#.parse::<Document>().unwrap());
    /// ```
    pub fn merging(&self, other: &Document) -> Option<Document> {
        let merged = self.value.as_object()?.merge(other.value.as_object()?);
        Some(Value::Object(merged).into())
    }

    /// Shallow union with `other`, shared keys resolved by `resolve(left, right)`
    pub fn merging_with<F>(&self, other: &Document, mut resolve: F) -> Option<Document>
    where
        F: FnMut(&Document, &Document) -> Document,
    {
        let left = self.value.as_object()?;
        let right = other.value.as_object()?;
        let merged = left.merge_with(right, |l, r| {
            resolve(&l.clone().into(), &r.clone().into()).into_value()
        });
        Some(Value::Object(merged).into())
    }

    /// In-place form of [`merging`](Self::merging); no-op unless both are objects
    pub fn merge(&mut self, other: &Document) {
        if let Some(merged) = self.merging(other) {
            *self = merged;
        } else {
            tracing::trace!(left = %self.kind(), right = %other.kind(), "merge skipped");
        }
    }

    /// In-place form of [`merging_with`](Self::merging_with)
    pub fn merge_with<F>(&mut self, other: &Document, resolve: F)
    where
        F: FnMut(&Document, &Document) -> Document,
    {
        if let Some(merged) = self.merging_with(other, resolve) {
            *self = merged;
        } else {
            tracing::trace!(left = %self.kind(), right = %other.kind(), "merge skipped");
        }
    }

    /// Merge a structured value into a copy of this object
    ///
    /// # Errors
    ///
    /// Fails only if `value` cannot be converted. `Ok(None)` unless both
    /// sides are objects.
    pub fn merging_structured<T>(&self, value: &T) -> ValueResult<Option<Document>>
    where
        T: Serialize + ?Sized,
    {
        Ok(self.merging(&Document::from_structured(value)?))
    }

    /// Merge a structured value in place
    ///
    /// # Errors
    ///
    /// Fails only if `value` cannot be converted.
    pub fn merge_structured<T>(&mut self, value: &T) -> ValueResult<()>
    where
        T: Serialize + ?Sized,
    {
        let other = Document::from_structured(value)?;
        self.merge(&other);
        Ok(())
    }

    /// Remove and return the element under `key`
    ///
    /// `None`, with nothing changed, if not an object or the key is missing.
    pub fn remove_key(&mut self, key: &str) -> Option<Document> {
        let (rest, removed) = self.value.as_object()?.remove(key)?;
        self.value = Value::Object(rest);
        Some(removed.into())
    }

    /// Untyped native form of every entry; `None` if not an object
    pub fn object_values(&self) -> Option<HashMap<String, serde_json::Value>> {
        match self.value.native()? {
            serde_json::Value::Object(map) => Some(map.into_iter().collect()),
            _ => None,
        }
    }
}
