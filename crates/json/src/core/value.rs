//! The Value enum
//!
//! A closed, recursive tagged union over the six JSON shapes. All numbers
//! share one `f64` representation; there is no integer variant.

use unicode_segmentation::UnicodeSegmentation;

use crate::collections::{Array, Object};
use crate::core::kind::ValueKind;
use crate::error::{ValueError, ValueResult};

/// One JSON datum
///
/// Containers are persistent (`im`), so cloning is O(1) and every
/// transformation produces a new value without disturbing other owners.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Any JSON numeral, integer or not
    Number(f64),

    /// Boolean value
    Bool(bool),

    /// UTF-8 string
    String(String),

    /// Ordered sequence of values
    Array(Array),

    /// String-keyed map of values
    Object(Object),
}

impl Value {
    // ==================== Constructors ====================

    /// Create a null value
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create a number value
    pub const fn number(v: f64) -> Self {
        Self::Number(v)
    }

    /// Create a boolean value
    pub const fn bool(v: bool) -> Self {
        Self::Bool(v)
    }

    /// Create a string value from String or &str
    pub fn string(v: impl Into<String>) -> Self {
        Self::String(v.into())
    }

    /// Create an empty array value
    pub fn array_empty() -> Self {
        Self::Array(Array::new())
    }

    /// Create an empty object value
    pub fn object_empty() -> Self {
        Self::Object(Object::new())
    }

    // ==================== Type queries ====================

    /// Get the shape of this value
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Number(_) => ValueKind::Number,
            Self::Bool(_) => ValueKind::Bool,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Check if this is null
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is a number
    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Check if this is a boolean
    #[inline]
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Check if this is a string
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Check if this is an array
    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Check if this is an object
    #[inline]
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    // ==================== Conversions (as_*) ====================

    /// Try to get as number
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as boolean
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as array reference
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object reference
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get as array or a shape mismatch error
    pub fn try_array(&self) -> ValueResult<&Array> {
        self.as_array()
            .ok_or_else(|| ValueError::shape_mismatch(ValueKind::Array, self.kind()))
    }

    /// Get as object or a shape mismatch error
    pub fn try_object(&self) -> ValueResult<&Object> {
        self.as_object()
            .ok_or_else(|| ValueError::shape_mismatch(ValueKind::Object, self.kind()))
    }

    // ==================== Native extraction ====================

    /// Unwrap into the untyped native representation
    ///
    /// Scalars unwrap to themselves, containers unwrap recursively. `Null`
    /// has no native form and yields `None`; nested nulls become
    /// `serde_json::Value::Null`. Non-finite numbers cannot be represented
    /// natively and are treated like null.
    #[must_use]
    pub fn native(&self) -> Option<serde_json::Value> {
        match self {
            Self::Null => None,
            Self::Number(n) => serde_json::Number::from_f64(*n).map(serde_json::Value::Number),
            Self::Bool(b) => Some(serde_json::Value::Bool(*b)),
            Self::String(s) => Some(serde_json::Value::String(s.clone())),
            Self::Array(arr) => Some(serde_json::Value::Array(
                arr.iter().map(Self::native_or_null).collect(),
            )),
            Self::Object(obj) => Some(serde_json::Value::Object(
                obj.entries()
                    .map(|(k, v)| (k.clone(), v.native_or_null()))
                    .collect(),
            )),
        }
    }

    fn native_or_null(&self) -> serde_json::Value {
        self.native().unwrap_or(serde_json::Value::Null)
    }

    /// Number of elements, keys or characters, if this shape is sized
    ///
    /// Characters are extended grapheme clusters, so `"e\u{301}"` counts 1.
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Null | Self::Number(_) | Self::Bool(_) => None,
            Self::String(s) => Some(s.graphemes(true).count()),
            Self::Array(arr) => Some(arr.len()),
            Self::Object(obj) => Some(obj.len()),
        }
    }
}

// ==================== From implementations ====================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<i64> for Value {
    /// Magnitudes above 2^53 lose precision.
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ==================== FromStr Implementation ====================

impl std::str::FromStr for Value {
    type Err = ValueError;

    /// Parse a Value from JSON text
    ///
    /// ```
    /// use nebula_json::Value;
    ///
    /// let value: Value = r#"{"name": "Alice"}"#.parse().unwrap();
    /// assert!(value.is_object());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::codec::from_slice_unbounded(s.as_bytes()).map_err(ValueError::decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_null() {
        let val = Value::null();
        assert!(val.is_null());
        assert_eq!(val.kind(), ValueKind::Null);
        assert_eq!(val.native(), None);
        assert_eq!(val.count(), None);
    }

    #[test]
    fn test_value_number() {
        let val = Value::number(2.5);
        assert!(val.is_number());
        assert_eq!(val.as_number(), Some(2.5));
        assert_eq!(val.as_bool(), None);
        assert_eq!(val.native(), Some(json!(2.5)));
    }

    #[test]
    fn test_integers_collapse_into_number() {
        assert_eq!(Value::from(42_i64), Value::number(42.0));
        assert_eq!(Value::from(7_i32).kind(), ValueKind::Number);
    }

    #[test]
    fn test_value_string() {
        let val = Value::string("héllo");
        assert!(val.is_string());
        assert_eq!(val.as_str(), Some("héllo"));
        assert_eq!(val.count(), Some(5));
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<bool>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::string("x"));
    }

    #[test]
    fn test_native_unwraps_recursively() {
        let val: Value = r#"{"a": [1, null, "x"], "b": {"c": true}}"#.parse().unwrap();
        assert_eq!(
            val.native(),
            Some(json!({"a": [1.0, null, "x"], "b": {"c": true}}))
        );
    }

    #[test]
    fn test_native_non_finite_number() {
        assert_eq!(Value::number(f64::NAN).native(), None);
        let arr = Value::Array(Array::from_vec(vec![Value::number(f64::INFINITY)]));
        assert_eq!(arr.native(), Some(json!([null])));
    }

    #[test]
    fn test_try_accessors() {
        let val = Value::bool(true);
        assert_eq!(
            val.try_array(),
            Err(ValueError::shape_mismatch(ValueKind::Array, ValueKind::Bool))
        );
        assert!(Value::object_empty().try_object().is_ok());
    }

    #[test]
    fn test_value_from_str() {
        assert_eq!("null".parse::<Value>().unwrap(), Value::Null);
        assert_eq!("42".parse::<Value>().unwrap(), Value::number(42.0));
        assert_eq!("\"42\"".parse::<Value>().unwrap(), Value::string("42"));
        assert!("invalid".parse::<Value>().is_err());
    }
}
