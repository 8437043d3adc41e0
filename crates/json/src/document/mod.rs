//! The Document facade
//!
//! A [`Document`] owns exactly one [`Value`] and exposes typed, keyed and
//! indexed access over it, plus array and object mutation in two flavours:
//! functional (`appending`, `merging`, ...) which return a new document,
//! and in-place (`append`, `merge`, ...) which replace the held value.
//!
//! Read paths answer `None` instead of failing. Each has a `try_*` form
//! returning [`ValueError`](crate::ValueError) and a `require*` form that
//! panics, for call sites that have already established the shape.
//!
//! Writes by key or index auto-vivify: setting a key on a non-object turns
//! the document into a one-entry object. Appends and inserts do not: on a
//! non-array they answer `None`, and their in-place forms do nothing.

mod access;
mod array;
mod bridge;
mod object;
mod typed;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::collections::{Array, Object};
use crate::core::{Value, ValueKind};

pub use array::Elements;
pub use bridge::Structured;
pub use typed::FromDocument;

/// Type-safe facade over one JSON value
///
/// Cloning is O(1) and clones are independent: mutating one never shows
/// through another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    value: Value,
}

impl Document {
    /// Create a null document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an array document from any sequence of elements
    pub fn array<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Document>,
    {
        elements.into_iter().map(Into::into).collect()
    }

    /// Create an object document from key/element pairs
    pub fn object<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Document>,
    {
        entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }

    /// Create an empty array document
    pub fn empty_array() -> Self {
        Value::array_empty().into()
    }

    /// Create an empty object document
    pub fn empty_object() -> Self {
        Value::object_empty().into()
    }

    /// Borrow the held value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Take the held value
    pub fn into_value(self) -> Value {
        self.value
    }

    // ==================== Introspection ====================

    /// Shape of the held value
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    /// Check if the document is null
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Replace the held value with null
    pub fn set_null(&mut self) {
        self.value = Value::Null;
    }

    /// Check if the document holds nothing
    ///
    /// Null is empty; numbers and booleans never are; strings, arrays and
    /// objects are empty when they have no characters, elements or keys.
    pub fn is_empty(&self) -> bool {
        match self.value {
            Value::Null => true,
            Value::Number(_) | Value::Bool(_) => false,
            Value::String(ref s) => s.is_empty(),
            Value::Array(ref arr) => arr.is_empty(),
            Value::Object(ref obj) => obj.is_empty(),
        }
    }

    /// Characters, elements or keys; `None` for unsized shapes
    pub fn count(&self) -> Option<usize> {
        self.value.count()
    }

    /// Replace the held value
    pub fn set(&mut self, value: impl Into<Document>) {
        self.value = raw(value);
    }

    /// Untyped native form of the held value (`None` for null)
    pub fn native(&self) -> Option<serde_json::Value> {
        self.value.native()
    }

    pub(crate) fn vivify(&mut self, target: ValueKind) {
        tracing::trace!(from = %self.kind(), to = %target, "auto-vivifying document");
        self.value = match target {
            ValueKind::Array => Value::Array(Array::from_vec(vec![Value::Null])),
            ValueKind::Object => Value::object_empty(),
            _ => Value::Null,
        };
    }
}

/// Unwrap anything convertible into a document down to its value
#[inline]
pub(crate) fn raw(value: impl Into<Document>) -> Value {
    let doc: Document = value.into();
    doc.value
}

impl fmt::Display for Document {
    /// `{}` is compact, `{:#}` is pretty with sorted keys
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

// ==================== From implementations ====================

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self { value }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.value
    }
}

macro_rules! from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Document {
                fn from(v: $ty) -> Self {
                    Value::from(v).into()
                }
            }
        )*
    };
}

from_scalar!(bool, f64, f32, i64, i32, u32, String, &str, Array, Object);

impl From<u64> for Document {
    /// Magnitudes above 2^53 lose precision.
    fn from(v: u64) -> Self {
        Value::Number(v as f64).into()
    }
}

impl From<serde_json::Value> for Document {
    fn from(v: serde_json::Value) -> Self {
        Value::from(v).into()
    }
}

impl<T: Into<Document>> From<Option<T>> for Document {
    fn from(v: Option<T>) -> Self {
        v.map_or_else(Document::new, Into::into)
    }
}

impl From<Vec<Document>> for Document {
    fn from(elements: Vec<Document>) -> Self {
        elements.into_iter().collect()
    }
}

impl From<HashMap<String, Document>> for Document {
    fn from(entries: HashMap<String, Document>) -> Self {
        entries.into_iter().collect()
    }
}

impl FromIterator<Document> for Document {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Value::from).collect()).into()
    }
}

impl FromIterator<(String, Document)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Document)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k, v.value)).collect()).into()
    }
}
