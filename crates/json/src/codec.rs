//! Byte-level encode/decode collaborator
//!
//! The document layer never writes or lexes JSON text itself. It sequences
//! calls through a [`Codec`], and [`JsonCodec`] is the `serde_json` backed
//! implementation used by default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use crate::core::{SortedKeys, Value};
use crate::error::{ValueError, ValueResult};

/// Turns structured values into bytes and back
pub trait Codec {
    /// Encode any serializable value
    ///
    /// # Errors
    ///
    /// `ValueError::EncodeFailure` if the value has no representation.
    fn encode<T>(&self, value: &T) -> ValueResult<Vec<u8>>
    where
        T: Serialize + ?Sized;

    /// Decode bytes into the requested type
    ///
    /// # Errors
    ///
    /// `ValueError::DecodeFailure` for malformed input or a payload whose
    /// shape does not fit `T`.
    fn decode<T>(&self, bytes: &[u8]) -> ValueResult<T>
    where
        T: DeserializeOwned;
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Output formatting for [`JsonCodec`]
///
/// Deserializable with defaults so it can sit inside an application config:
///
/// ```
/// use nebula_json::EncodeOptions;
///
/// let options: EncodeOptions = serde_json::from_str(r#"{"sort_keys": true}"#).unwrap();
/// assert_eq!(options, EncodeOptions::compact().sorted_keys());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Break lines and indent nested containers
    pub pretty: bool,

    /// Write every object's keys in ascending order
    pub sort_keys: bool,

    /// Indentation unit used when `pretty` is set
    pub indent: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            sort_keys: false,
            indent: "  ".to_string(),
        }
    }
}

impl EncodeOptions {
    /// Single line, keys in storage order
    pub fn compact() -> Self {
        Self::default()
    }

    /// Pretty printed with sorted keys, stable across runs
    pub fn canonical() -> Self {
        Self::default().pretty().sorted_keys()
    }

    /// Enable pretty printing
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Enable sorted keys
    #[must_use]
    pub fn sorted_keys(mut self) -> Self {
        self.sort_keys = true;
        self
    }

    /// Set the indentation unit (implies nothing about `pretty`)
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

// ============================================================================
// JSON CODEC
// ============================================================================

/// `serde_json` implementation of [`Codec`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonCodec {
    options: EncodeOptions,
}

impl JsonCodec {
    /// Create a codec with the given output options
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Compact codec with sorted keys
    pub fn sorted() -> Self {
        Self::new(EncodeOptions::compact().sorted_keys())
    }

    /// Pretty, sorted codec
    pub fn canonical() -> Self {
        Self::new(EncodeOptions::canonical())
    }

    /// The output options in effect
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    fn write<T>(&self, value: &T) -> serde_json::Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        if self.options.pretty {
            let formatter = PrettyFormatter::with_indent(self.options.indent.as_bytes());
            write_with(value, formatter)
        } else {
            write_with(value, CompactFormatter)
        }
    }
}

fn write_with<T, F>(value: &T, formatter: F) -> serde_json::Result<Vec<u8>>
where
    T: Serialize + ?Sized,
    F: Formatter,
{
    let mut out = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

/// Parse JSON without serde_json's 128-level nesting limit
///
/// Recursion runs on a growable stack, so depth is bounded by memory.
pub(crate) fn from_slice_unbounded<T>(bytes: &[u8]) -> serde_json::Result<T>
where
    T: DeserializeOwned,
{
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

impl Codec for JsonCodec {
    fn encode<T>(&self, value: &T) -> ValueResult<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        let bytes = if self.options.sort_keys {
            let tree = serde_json::to_value(value).map_err(ValueError::encode)?;
            self.write(&SortedKeys(&Value::from(tree)))
        } else {
            self.write(value)
        };
        bytes.map_err(ValueError::encode)
    }

    fn decode<T>(&self, bytes: &[u8]) -> ValueResult<T>
    where
        T: DeserializeOwned,
    {
        from_slice_unbounded(bytes).map_err(|e| {
            tracing::debug!(
                target_type = std::any::type_name::<T>(),
                len = bytes.len(),
                error = %e,
                "json decode failed"
            );
            ValueError::decode(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Point {
        y: i32,
        x: i32,
    }

    #[test]
    fn test_compact_keeps_field_order() {
        let bytes = JsonCodec::default().encode(&Point { y: 1, x: 2 }).unwrap();
        assert_eq!(bytes, br#"{"y":1,"x":2}"#);
    }

    #[test]
    fn test_sorted_keys() {
        let bytes = JsonCodec::sorted().encode(&Point { y: 1, x: 2 }).unwrap();
        assert_eq!(bytes, br#"{"x":2,"y":1}"#);
    }

    #[test]
    fn test_pretty_with_indent() {
        let codec = JsonCodec::new(EncodeOptions::compact().pretty().with_indent("\t"));
        let mut map = BTreeMap::new();
        map.insert("a", vec![1]);
        let text = String::from_utf8(codec.encode(&map).unwrap()).unwrap();
        assert_eq!(text, "{\n\t\"a\": [\n\t\t1\n\t]\n}");
    }

    #[test]
    fn test_decode_failure() {
        let err = JsonCodec::default().decode::<Value>(b"{oops").unwrap_err();
        assert_eq!(err.code(), "JSON_DECODE_FAILURE");
    }

    #[test]
    fn test_decode_shape_mismatch_is_decode_failure() {
        let err = JsonCodec::default().decode::<Vec<i32>>(br#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, ValueError::DecodeFailure { .. }));
    }

    #[test]
    fn test_encode_non_finite_value_fails() {
        let err = JsonCodec::default()
            .encode(&Value::number(f64::INFINITY))
            .unwrap_err();
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_options_defaults_from_config() {
        let options: EncodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, EncodeOptions::compact());
        assert_eq!(options.indent, "  ");

        let options: EncodeOptions =
            serde_json::from_str(r#"{"pretty": true, "sort_keys": true}"#).unwrap();
        assert_eq!(options, EncodeOptions::canonical());
    }

    #[test]
    fn test_decode_past_default_nesting_limit() {
        let text = format!("{}1{}", "[".repeat(1000), "]".repeat(1000));
        let value: Value = JsonCodec::default().decode(text.as_bytes()).unwrap();
        assert!(value.is_array());

        let trailing = format!("{text} 2");
        assert!(JsonCodec::default().decode::<Value>(trailing.as_bytes()).is_err());
    }
}
