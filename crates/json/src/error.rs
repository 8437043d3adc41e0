//! Document Error Types
//!
//! Non-forced accessors never produce these; they answer with `None`.
//! The `try_*` accessors, the structured bridge and the text codec return
//! [`ValueError`], and the forced accessors panic with its `Display` text.

use thiserror::Error;

use crate::core::kind::ValueKind;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Errors raised by document access, conversion and encoding
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The current shape is incompatible with the requested operation
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Array index out of bounds
    #[error("Index {index} out of bounds (length: {length})")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Object key not found
    #[error("Key not found: '{key}'")]
    KeyNotFound { key: String },

    /// Text, bytes or structured payload could not be decoded
    #[error("Decode failure: {message}")]
    DecodeFailure { message: String },

    /// Value could not be encoded
    #[error("Encode failure: {message}")]
    EncodeFailure { message: String },

    /// Malformed path expression
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Context information (nested error with additional info)
    #[error("{message}: {source}")]
    WithContext {
        message: String,
        #[source]
        source: Box<ValueError>,
    },
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValueError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: ValueKind, actual: ValueKind) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }

    /// Create a key not found error
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Create a decode failure from any displayable cause
    pub fn decode(cause: impl std::fmt::Display) -> Self {
        Self::DecodeFailure {
            message: cause.to_string(),
        }
    }

    /// Create an encode failure from any displayable cause
    pub fn encode(cause: impl std::fmt::Display) -> Self {
        Self::EncodeFailure {
            message: cause.to_string(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, message: impl Into<String>) -> Self {
        Self::WithContext {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// Add key context
    pub fn at_key(self, key: impl Into<String>) -> Self {
        self.with_context(format!("at key: '{}'", key.into()))
    }

    /// Add index context
    pub fn at_index(self, index: usize) -> Self {
        self.with_context(format!("at index: {index}"))
    }

    /// The innermost error, with all context layers removed
    pub fn root(&self) -> &Self {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl ValueError {
    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { .. } => "JSON_SHAPE_MISMATCH",
            Self::IndexOutOfBounds { .. } => "JSON_INDEX_OUT_OF_BOUNDS",
            Self::KeyNotFound { .. } => "JSON_KEY_NOT_FOUND",
            Self::DecodeFailure { .. } => "JSON_DECODE_FAILURE",
            Self::EncodeFailure { .. } => "JSON_ENCODE_FAILURE",
            Self::InvalidPath { .. } => "JSON_INVALID_PATH",
            Self::WithContext { source, .. } => source.code(),
        }
    }

    /// Check if this is a client error (caller's fault)
    ///
    /// Encode failures come from values the serializer cannot represent
    /// and are the only kind attributed to the library side.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::EncodeFailure { .. } => false,
            Self::WithContext { source, .. } => source.is_client_error(),
            _ => true,
        }
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Result type alias for document operations
pub type ValueResult<T> = std::result::Result<T, ValueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch() {
        let err = ValueError::shape_mismatch(ValueKind::Object, ValueKind::Array);
        assert_eq!(err.code(), "JSON_SHAPE_MISMATCH");
        assert_eq!(err.to_string(), "Shape mismatch: expected object, got array");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_index_out_of_bounds() {
        let err = ValueError::index_out_of_bounds(5, 3);
        assert_eq!(err.code(), "JSON_INDEX_OUT_OF_BOUNDS");
        assert!(err.to_string().contains('5'));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_with_context() {
        let err = ValueError::key_not_found("name").at_index(0).at_key("users");

        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("users"));
        assert!(msg.contains("index: 0"));
        assert_eq!(err.code(), "JSON_KEY_NOT_FOUND");
        assert_eq!(err.root(), &ValueError::key_not_found("name"));
    }

    #[test]
    fn test_encode_failure_is_not_client_error() {
        let err = ValueError::encode("NaN is not representable");
        assert_eq!(err.code(), "JSON_ENCODE_FAILURE");
        assert!(!err.is_client_error());
        assert!(!err.with_context("writing payload").is_client_error());
    }

    #[test]
    fn test_decode_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err = ValueError::decode(json_err);
        assert!(matches!(err, ValueError::DecodeFailure { .. }));
        assert_eq!(err.code(), "JSON_DECODE_FAILURE");
    }

    #[test]
    fn test_invalid_path() {
        let err = ValueError::invalid_path("a[x]", "index is not a number");
        assert_eq!(err.code(), "JSON_INVALID_PATH");
        assert!(err.to_string().contains("a[x]"));
    }
}
