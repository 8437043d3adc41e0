//! Array mutation, functional and in place
//!
//! Functional forms answer `None` when the document is not an array or the
//! index is invalid. In-place forms leave the document untouched in those
//! cases.

use serde::Serialize;

use super::{Document, raw};
use crate::collections::Array;
use crate::core::Value;
use crate::error::ValueResult;

impl Document {
    fn with_array<F>(&self, op: F) -> Option<Document>
    where
        F: FnOnce(&Array) -> ValueResult<Array>,
    {
        let arr = self.value.as_array()?;
        op(arr).ok().map(|arr| Value::Array(arr).into())
    }

    fn replace_with(&mut self, op: &'static str, next: Option<Document>) {
        match next {
            Some(doc) => *self = doc,
            None => tracing::trace!(op, kind = %self.kind(), "array mutation skipped"),
        }
    }

    // ==================== Append ====================

    /// Copy with `value` appended; `None` if not an array
    pub fn appending(&self, value: impl Into<Document>) -> Option<Document> {
        self.with_array(|arr| Ok(arr.push(raw(value))))
    }

    /// Append `value`; no-op if not an array
    pub fn append(&mut self, value: impl Into<Document>) {
        let next = self.appending(value);
        self.replace_with("append", next);
    }

    /// Copy with `other` appended
    ///
    /// An array `other` contributes each of its elements, anything else is
    /// appended as one element. `None` if this document is not an array.
    pub fn appending_contents_of(&self, other: &Document) -> Option<Document> {
        self.with_array(|arr| {
            Ok(match &other.value {
                Value::Array(tail) => arr.concat(tail),
                single => arr.push(single.clone()),
            })
        })
    }

    /// In-place form of [`appending_contents_of`](Self::appending_contents_of)
    pub fn append_contents_of(&mut self, other: &Document) {
        let next = self.appending_contents_of(other);
        self.replace_with("append_contents_of", next);
    }

    // ==================== Insert ====================

    /// Copy with `value` inserted before `index` (`index <= len`)
    pub fn inserting(&self, value: impl Into<Document>, index: usize) -> Option<Document> {
        self.with_array(|arr| arr.insert(index, raw(value)))
    }

    /// Insert `value` before `index`; no-op if not an array or out of bounds
    pub fn insert(&mut self, value: impl Into<Document>, index: usize) {
        let next = self.inserting(value, index);
        self.replace_with("insert", next);
    }

    /// Copy with `other` inserted before `index`
    ///
    /// Splices an array `other`, inserts anything else as one element.
    pub fn inserting_contents_of(&self, other: &Document, index: usize) -> Option<Document> {
        self.with_array(|arr| match &other.value {
            Value::Array(items) => arr.splice(index, items),
            single => arr.insert(index, single.clone()),
        })
    }

    /// In-place form of [`inserting_contents_of`](Self::inserting_contents_of)
    pub fn insert_contents_of(&mut self, other: &Document, index: usize) {
        let next = self.inserting_contents_of(other, index);
        self.replace_with("insert_contents_of", next);
    }

    // ==================== Structured elements ====================

    /// Copy with a structured value appended
    ///
    /// # Errors
    ///
    /// Fails only if `value` cannot be converted. `Ok(None)` when this
    /// document is not an array.
    pub fn appending_structured<T>(&self, value: &T) -> ValueResult<Option<Document>>
    where
        T: Serialize + ?Sized,
    {
        Ok(self.appending(Document::from_structured(value)?))
    }

    /// Append a structured value; no-op if not an array
    ///
    /// # Errors
    ///
    /// Fails only if `value` cannot be converted.
    pub fn append_structured<T>(&mut self, value: &T) -> ValueResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.append(Document::from_structured(value)?);
        Ok(())
    }

    /// Copy with a structured value inserted before `index`
    ///
    /// # Errors
    ///
    /// Fails only if `value` cannot be converted.
    pub fn inserting_structured<T>(&self, value: &T, index: usize) -> ValueResult<Option<Document>>
    where
        T: Serialize + ?Sized,
    {
        Ok(self.inserting(Document::from_structured(value)?, index))
    }

    /// Insert a structured value before `index`
    ///
    /// # Errors
    ///
    /// Fails only if `value` cannot be converted.
    pub fn insert_structured<T>(&mut self, value: &T, index: usize) -> ValueResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.insert(Document::from_structured(value)?, index);
        Ok(())
    }

    // ==================== Remove ====================

    /// Copy without the element at `index`
    pub fn removing_element(&self, index: usize) -> Option<Document> {
        self.with_array(|arr| arr.remove(index).map(|(rest, _)| rest))
    }

    /// Remove and return the element at `index`
    ///
    /// ```
    /// use nebula_json::Document;
    ///
    /// let mut doc = Document::array([1, 2, 3]);
    /// assert_eq!(doc.remove_element(1), Some(Document::from(2)));
    /// assert_eq!(doc, Document::array([1, 3]));
    /// ```
    pub fn remove_element(&mut self, index: usize) -> Option<Document> {
        let removed = self
            .value
            .as_array()
            .and_then(|arr| arr.remove(index).ok());
        match removed {
            Some((rest, element)) => {
                self.value = Value::Array(rest);
                Some(element.into())
            }
            None => {
                tracing::trace!(op = "remove_element", index, kind = %self.kind(), "array mutation skipped");
                None
            }
        }
    }

    /// Empty container of the same shape; null for scalars
    pub fn removing_all(&self) -> Document {
        match self.value {
            Value::Array(_) => Document::empty_array(),
            Value::Object(_) => Document::empty_object(),
            _ => Document::new(),
        }
    }

    /// In-place form of [`removing_all`](Self::removing_all)
    pub fn remove_all(&mut self) {
        *self = self.removing_all();
    }

    // ==================== Iteration ====================

    /// Elements of an array document; nothing for other shapes
    pub fn elements(&self) -> Elements<'_> {
        Elements {
            inner: self.value.as_array().map(Array::iter),
        }
    }

    /// Untyped native form of every element; `None` if not an array
    pub fn array_values(&self) -> Option<Vec<serde_json::Value>> {
        match self.value.native()? {
            serde_json::Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Iterator over an array document's elements
pub struct Elements<'a> {
    inner: Option<im::vector::Iter<'a, Value>>,
}

impl Iterator for Elements<'_> {
    type Item = Document;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next().cloned().map(Document::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner
            .as_ref()
            .map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = Document;
    type IntoIter = Elements<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        text.parse().unwrap()
    }

    #[test]
    fn test_appending() {
        let d = doc("[1]");
        assert_eq!(d.appending("x"), Some(doc(r#"[1, "x"]"#)));
        assert_eq!(d, doc("[1]"));
        assert_eq!(Document::new().appending(1), None);
        assert_eq!(doc("{}").appending(1), None);
    }

    #[test]
    fn test_append_on_non_array_is_noop() {
        let mut d = doc(r#"{"a": 1}"#);
        d.append(2);
        assert_eq!(d, doc(r#"{"a": 1}"#));

        let mut d = Document::new();
        d.append(2);
        assert!(d.is_null());
    }

    #[test]
    fn test_appending_contents_of() {
        let d = doc("[1]");
        assert_eq!(d.appending_contents_of(&doc("[2, 3]")), Some(doc("[1, 2, 3]")));
        assert_eq!(d.appending_contents_of(&doc("{}")), Some(doc("[1, {}]")));
        assert_eq!(doc("true").appending_contents_of(&doc("[2]")), None);

        let mut d = doc("[]");
        d.append_contents_of(&doc("[[1]]"));
        assert_eq!(d, doc("[[1]]"));
    }

    #[test]
    fn test_inserting() {
        let d = doc("[1, 3]");
        assert_eq!(d.inserting(2, 1), Some(doc("[1, 2, 3]")));
        assert_eq!(d.inserting(4, 2), Some(doc("[1, 3, 4]")));
        assert_eq!(d.inserting(9, 3), None);
        assert_eq!(Document::from("s").inserting(1, 0), None);

        let mut d = doc("[1]");
        d.insert(0, 5);
        assert_eq!(d, doc("[1]"));
        d.insert(0, 0);
        assert_eq!(d, doc("[0, 1]"));
    }

    #[test]
    fn test_inserting_contents_of() {
        let d = doc("[1, 4]");
        assert_eq!(d.inserting_contents_of(&doc("[2, 3]"), 1), Some(doc("[1, 2, 3, 4]")));
        assert_eq!(d.inserting_contents_of(&doc("null"), 0), Some(doc("[null, 1, 4]")));
        assert_eq!(d.inserting_contents_of(&doc("[2]"), 3), None);

        let mut d = doc("[]");
        d.insert_contents_of(&doc("[1, 2]"), 0);
        assert_eq!(d, doc("[1, 2]"));
    }

    #[test]
    fn test_structured_elements() {
        #[derive(Serialize)]
        struct Tag<'a> {
            name: &'a str,
        }

        let mut d = doc("[]");
        d.append_structured(&Tag { name: "a" }).unwrap();
        d.insert_structured(&0, 0).unwrap();
        assert_eq!(d, doc(r#"[0, {"name": "a"}]"#));
        assert_eq!(
            d.appending_structured(&true).unwrap(),
            Some(doc(r#"[0, {"name": "a"}, true]"#))
        );
        assert_eq!(
            d.inserting_structured(&"z", 9).unwrap(),
            None
        );
        assert_eq!(Document::new().appending_structured(&1).unwrap(), None);
    }

    #[test]
    fn test_removing_element() {
        let d = doc("[1, 2, 3]");
        assert_eq!(d.removing_element(0), Some(doc("[2, 3]")));
        assert_eq!(d.removing_element(3), None);
        assert_eq!(doc("{}").removing_element(0), None);
    }

    #[test]
    fn test_remove_element_returns_removed() {
        let mut d = doc("[1, 2, 3]");
        assert_eq!(d.remove_element(1), Some(Document::from(2)));
        assert_eq!(d, doc("[1, 3]"));
        assert_eq!(d.remove_element(5), None);
        assert_eq!(d, doc("[1, 3]"));
    }

    #[test]
    fn test_removing_all() {
        assert_eq!(doc("[1, 2]").removing_all(), Document::empty_array());
        assert_eq!(doc(r#"{"a": 1}"#).removing_all(), Document::empty_object());
        assert!(doc("\"s\"").removing_all().is_null());
        assert!(doc("5").removing_all().is_null());

        let mut d = doc("[1]");
        d.remove_all();
        assert_eq!(d.count(), Some(0));
    }

    #[test]
    fn test_elements() {
        let d = doc(r#"[1, "a", null]"#);
        let items: Vec<Document> = d.elements().collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1], Document::from("a"));
        assert_eq!(d.elements().size_hint(), (3, Some(3)));

        let mut seen = 0;
        for _ in &d {
            seen += 1;
        }
        assert_eq!(seen, 3);

        assert_eq!(doc(r#"{"a": 1}"#).elements().count(), 0);
    }

    #[test]
    fn test_array_values() {
        let d = doc(r#"[1, null, [true]]"#);
        assert_eq!(
            d.array_values(),
            Some(vec![
                serde_json::json!(1.0),
                serde_json::Value::Null,
                serde_json::json!([true])
            ])
        );
        assert_eq!(doc("{}").array_values(), None);
        assert_eq!(Document::new().array_values(), None);
    }
}
