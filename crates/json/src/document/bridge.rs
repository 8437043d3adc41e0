//! Structured bridge and text round trip
//!
//! Converts between a document and any `serde` type by routing through a
//! [`Codec`]: encode the source to bytes, decode the bytes as the target.
//! The document layer never interprets the bytes itself.

use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Document;
use crate::codec::{Codec, JsonCodec};
use crate::collections::{Array, Object};
use crate::core::Value;
use crate::error::{ValueError, ValueResult};

/// A value that can become a [`Document`] through codec `C`
///
/// Object safe, so batches of unrelated types can be passed as
/// `&[&dyn Structured]`. Every `Serialize` type implements it.
pub trait Structured<C: Codec = JsonCodec> {
    /// Convert through `codec`
    ///
    /// # Errors
    ///
    /// Propagates the codec's encode or decode failure.
    fn to_document(&self, codec: &C) -> ValueResult<Document>;
}

impl<C: Codec, T: Serialize> Structured<C> for T {
    fn to_document(&self, codec: &C) -> ValueResult<Document> {
        Document::from_structured_with(self, codec)
    }
}

impl Document {
    // ==================== From structured ====================

    /// Convert any serializable value with the default JSON codec
    ///
    /// ```
    /// use nebula_json::Document;
    ///
    /// let doc = Document::from_structured(&vec![1, 2]).unwrap();
    /// assert_eq!(doc, Document::array([1, 2]));
    /// ```
    ///
    /// # Errors
    ///
    /// `EncodeFailure` if the codec cannot represent `value`.
    pub fn from_structured<T>(value: &T) -> ValueResult<Self>
    where
        T: Serialize + ?Sized,
    {
        Self::from_structured_with(value, &JsonCodec::default())
    }

    /// Convert any serializable value through `codec`
    ///
    /// # Errors
    ///
    /// Whatever the codec reports on either leg.
    pub fn from_structured_with<T, C>(value: &T, codec: &C) -> ValueResult<Self>
    where
        T: Serialize + ?Sized,
        C: Codec,
    {
        let bytes = codec.encode(value)?;
        codec.decode::<Value>(&bytes).map(Self::from)
    }

    /// Convert `value`, wrapping it as `{key: value}` when a key is given
    ///
    /// # Errors
    ///
    /// As [`from_structured`](Self::from_structured).
    pub fn from_structured_at_key<T>(value: &T, key: Option<&str>) -> ValueResult<Self>
    where
        T: Serialize + ?Sized,
    {
        let doc = Self::from_structured(value)?;
        Ok(match key {
            Some(key) => Value::Object(Object::new().insert(key, doc.value)).into(),
            None => doc,
        })
    }

    /// Build an array from heterogeneous structured values
    ///
    /// ```
    /// use nebula_json::Document;
    ///
    /// let doc = Document::from_values(&[&1, &"two", &[3.5]]).unwrap();
    /// assert_eq!(doc.to_string(), r#"[1,"two",[3.5]]"#);
    /// ```
    ///
    /// # Errors
    ///
    /// The first element's conversion failure, with its index as context.
    pub fn from_values(values: &[&dyn Structured]) -> ValueResult<Self> {
        Self::from_values_with(values, &JsonCodec::default())
    }

    /// [`from_values`](Self::from_values) through a specific codec
    ///
    /// # Errors
    ///
    /// The first element's conversion failure, with its index as context.
    pub fn from_values_with<C: Codec>(values: &[&dyn Structured<C>], codec: &C) -> ValueResult<Self> {
        let items = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.to_document(codec)
                    .map(Document::into_value)
                    .map_err(|e| e.at_index(i))
            })
            .collect::<ValueResult<Array>>()?;
        Ok(Value::Array(items).into())
    }

    /// Build an object from keys and heterogeneous structured values
    ///
    /// ```
    /// use nebula_json::{Document, Structured};
    ///
    /// let doc = Document::from_entries([
    ///     ("id", &7 as &dyn Structured),
    ///     ("tags", &vec!["a"] as &dyn Structured),
    /// ])
    /// .unwrap();
    /// assert_eq!(doc.require_key("id"), Document::from(7));
    /// ```
    ///
    /// # Errors
    ///
    /// The first entry's conversion failure, with its key as context.
    pub fn from_entries<'a, I, K>(entries: I) -> ValueResult<Self>
    where
        I: IntoIterator<Item = (K, &'a dyn Structured)>,
        K: Into<String>,
    {
        Self::from_entries_with(entries, &JsonCodec::default())
    }

    /// [`from_entries`](Self::from_entries) through a specific codec
    ///
    /// # Errors
    ///
    /// The first entry's conversion failure, with its key as context.
    pub fn from_entries_with<'a, I, K, C>(entries: I, codec: &C) -> ValueResult<Self>
    where
        I: IntoIterator<Item = (K, &'a dyn Structured<C>)>,
        K: Into<String>,
        C: Codec + 'a,
    {
        let mut obj = Object::new();
        for (key, value) in entries {
            let key = key.into();
            let doc = value.to_document(codec).map_err(|e| e.at_key(key.as_str()))?;
            obj = obj.insert(key, doc.value);
        }
        Ok(Value::Object(obj).into())
    }

    // ==================== To structured ====================

    /// Decode the held value as `T`
    ///
    /// # Errors
    ///
    /// `DecodeFailure` when the held shape does not fit `T`, `EncodeFailure`
    /// when the held value has no JSON form (non-finite numbers).
    pub fn try_to_structured<T: DeserializeOwned>(&self) -> ValueResult<T> {
        self.try_to_structured_with(&JsonCodec::default())
    }

    /// Decode the held value as `T` through `codec`
    ///
    /// # Errors
    ///
    /// Whatever the codec reports on either leg.
    pub fn try_to_structured_with<T, C>(&self, codec: &C) -> ValueResult<T>
    where
        T: DeserializeOwned,
        C: Codec,
    {
        let bytes = codec.encode(&self.value)?;
        codec.decode(&bytes)
    }

    /// Decode the held value as `T`, for call sites that know it fits
    ///
    /// # Panics
    ///
    /// Panics with the conversion error.
    #[track_caller]
    pub fn to_structured<T: DeserializeOwned>(&self) -> T {
        match self.try_to_structured() {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Replace the held value with a converted structured value
    ///
    /// # Errors
    ///
    /// As [`from_structured`](Self::from_structured); the document is left
    /// unchanged on error.
    pub fn set_structured<T>(&mut self, value: &T) -> ValueResult<()>
    where
        T: Serialize + ?Sized,
    {
        *self = Self::from_structured(value)?;
        Ok(())
    }

    // ==================== Text and bytes ====================

    /// Parse JSON text
    ///
    /// # Errors
    ///
    /// `DecodeFailure` for malformed text.
    pub fn from_text(text: &str) -> ValueResult<Self> {
        Self::from_slice(text.as_bytes())
    }

    /// Parse JSON bytes
    ///
    /// # Errors
    ///
    /// `DecodeFailure` for malformed input.
    pub fn from_slice(bytes: &[u8]) -> ValueResult<Self> {
        JsonCodec::default().decode::<Value>(bytes).map(Self::from)
    }

    /// Compact JSON text
    ///
    /// # Errors
    ///
    /// `EncodeFailure` if the held value contains a non-finite number.
    pub fn to_text(&self) -> ValueResult<String> {
        self.to_text_with(&JsonCodec::default())
    }

    /// JSON text through `codec`
    ///
    /// ```
    /// use nebula_json::{Document, JsonCodec};
    ///
    /// let mut doc = Document::new();
    /// doc.set_key("b", 1);
    /// doc.set_key("a", 2);
    /// assert_eq!(doc.to_text_with(&JsonCodec::sorted()).unwrap(), r#"{"a":2,"b":1}"#);
    /// ```
    ///
    /// # Errors
    ///
    /// `EncodeFailure` if the codec rejects the value or its output is not
    /// UTF-8.
    pub fn to_text_with<C: Codec>(&self, codec: &C) -> ValueResult<String> {
        String::from_utf8(self.to_bytes_with(codec)?).map_err(ValueError::encode)
    }

    /// Compact JSON bytes
    ///
    /// # Errors
    ///
    /// `EncodeFailure` if the held value contains a non-finite number.
    pub fn to_bytes(&self) -> ValueResult<Vec<u8>> {
        self.to_bytes_with(&JsonCodec::default())
    }

    /// Bytes through `codec`
    ///
    /// # Errors
    ///
    /// Whatever the codec reports.
    pub fn to_bytes_with<C: Codec>(&self, codec: &C) -> ValueResult<Vec<u8>> {
        codec.encode(&self.value)
    }
}

impl FromStr for Document {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}
