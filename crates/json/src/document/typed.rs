//! Typed reads
//!
//! A typed read succeeds only when the held shape matches the requested
//! type exactly. Nothing coerces between shapes: a boolean is never read
//! from a number, a number never from a string.
//!
//! Integers are views over the single number representation. Reading one
//! truncates toward zero and saturates at the target type's bounds.

use std::collections::HashMap;

use super::Document;
use crate::core::{Value, ValueKind};
use crate::error::{ValueError, ValueResult};

/// Types that can be read out of a [`Document`]
pub trait FromDocument: Sized {
    /// Read `Self`, or report why the held value does not fit
    ///
    /// # Errors
    ///
    /// `ValueError::ShapeMismatch` when the shape differs, or
    /// `ValueError::DecodeFailure` when a number has no integer view.
    fn from_document(doc: &Document) -> ValueResult<Self>;
}

#[inline]
fn mismatch(expected: ValueKind, doc: &Document) -> ValueError {
    ValueError::shape_mismatch(expected, doc.kind())
}

#[inline]
fn number(doc: &Document) -> ValueResult<f64> {
    doc.value()
        .as_number()
        .ok_or_else(|| mismatch(ValueKind::Number, doc))
}

/// Finite numbers truncated toward zero; NaN and infinities have no view
fn whole(doc: &Document) -> ValueResult<f64> {
    let n = number(doc)?;
    if n.is_finite() {
        Ok(n.trunc())
    } else {
        Err(ValueError::decode(format!("number {n} has no integer view")))
    }
}

impl FromDocument for f64 {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        number(doc)
    }
}

impl FromDocument for f32 {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        number(doc).map(|n| n as f32)
    }
}

impl FromDocument for i64 {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        whole(doc).map(|n| n as i64)
    }
}

impl FromDocument for i32 {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        whole(doc).map(|n| n as i32)
    }
}

impl FromDocument for u64 {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        whole(doc).map(|n| n as u64)
    }
}

impl FromDocument for bool {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        doc.value()
            .as_bool()
            .ok_or_else(|| mismatch(ValueKind::Bool, doc))
    }
}

impl FromDocument for String {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        doc.value()
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| mismatch(ValueKind::String, doc))
    }
}

impl FromDocument for Vec<Document> {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        let arr = doc.value().try_array()?;
        Ok(arr.iter().cloned().map(Document::from).collect())
    }
}

impl FromDocument for HashMap<String, Document> {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        let obj = doc.value().try_object()?;
        Ok(obj
            .entries()
            .map(|(k, v)| (k.clone(), Document::from(v.clone())))
            .collect())
    }
}

impl FromDocument for Value {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        Ok(doc.value().clone())
    }
}

impl FromDocument for Document {
    fn from_document(doc: &Document) -> ValueResult<Self> {
        Ok(doc.clone())
    }
}

impl Document {
    /// Read the held value as `T`, `None` on shape mismatch
    ///
    /// ```
    /// use nebula_json::Document;
    ///
    /// let doc = Document::from(3.9);
    /// assert_eq!(doc.get::<f64>(), Some(3.9));
    /// assert_eq!(doc.get::<i64>(), Some(3));
    /// assert_eq!(doc.get::<bool>(), None);
    /// ```
    pub fn get<T: FromDocument>(&self) -> Option<T> {
        T::from_document(self).ok()
    }

    /// Read the held value as `T`
    ///
    /// # Errors
    ///
    /// See [`FromDocument::from_document`].
    pub fn try_get<T: FromDocument>(&self) -> ValueResult<T> {
        T::from_document(self)
    }

    /// Read the held value as `T`, for call sites that know the shape
    ///
    /// # Panics
    ///
    /// Panics with the error message if the held value is not a `T`.
    #[track_caller]
    pub fn require<T: FromDocument>(&self) -> T {
        match T::from_document(self) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_coercion_between_shapes() {
        let doc = Document::from(1);
        assert_eq!(doc.get::<bool>(), None);
        assert_eq!(doc.get::<String>(), None);
        assert_eq!(Document::from("1").get::<f64>(), None);
        assert_eq!(Document::from(true).get::<i64>(), None);
    }

    #[test]
    fn test_integer_views_truncate() {
        assert_eq!(Document::from(2.99).get::<i64>(), Some(2));
        assert_eq!(Document::from(-2.99).get::<i32>(), Some(-2));
        assert_eq!(Document::from(7_u64).get::<u64>(), Some(7));
    }

    #[test]
    fn test_integer_views_saturate() {
        assert_eq!(Document::from(1e20).get::<i32>(), Some(i32::MAX));
        assert_eq!(Document::from(-5).get::<u64>(), Some(0));
    }

    #[test]
    fn test_non_finite_has_no_integer_view() {
        let doc = Document::from(f64::NAN);
        assert!(doc.get::<f64>().unwrap().is_nan());
        let err = doc.try_get::<i64>().unwrap_err();
        assert_eq!(err.code(), "JSON_DECODE_FAILURE");
    }

    #[test]
    fn test_try_get_reports_shapes() {
        let err = Document::from("x").try_get::<bool>().unwrap_err();
        assert_eq!(
            err,
            ValueError::shape_mismatch(ValueKind::Bool, ValueKind::String)
        );
    }

    #[test]
    fn test_collections() {
        let doc = Document::array([1, 2]);
        let elements: Vec<Document> = doc.require();
        assert_eq!(elements, vec![Document::from(1), Document::from(2)]);
        assert_eq!(doc.get::<HashMap<String, Document>>(), None);

        let doc = Document::object([("a", "x")]);
        let map: HashMap<String, Document> = doc.require();
        assert_eq!(map["a"], Document::from("x"));
    }

    #[test]
    fn test_document_and_value_always_read() {
        let doc = Document::new();
        assert_eq!(doc.get::<Document>(), Some(Document::new()));
        assert_eq!(doc.get::<Value>(), Some(Value::Null));
    }

    #[test]
    #[should_panic(expected = "Shape mismatch: expected string, got number")]
    fn test_require_panics_with_message() {
        let _: String = Document::from(1).require();
    }
}
