#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(clippy::all)]
//! # nebula-json
//!
//! A JSON document model with type-checked access.
//!
//! - [`Value`] is a closed union over the six JSON shapes, built on
//!   persistent containers so clones are cheap and independent.
//! - [`Document`] wraps one value with typed getters, keyed, indexed and
//!   path access, array and object mutation, and merging.
//! - The structured bridge converts any `serde` type to and from a
//!   document through a replaceable [`Codec`].
//!
//! ```
//! use nebula_json::{Document, JsonCodec};
//!
//! let mut doc: Document = r#"{"a": 1, "b": [1, 2, 3]}"#.parse().unwrap();
//! assert_eq!(doc.require_key("b").require_index(1).require::<f64>(), 2.0);
//!
//! doc.set_path("c.d[0]", true).unwrap();
//! assert_eq!(
//!     doc.to_text_with(&JsonCodec::sorted()).unwrap(),
//!     r#"{"a":1,"b":[1,2,3],"c":{"d":[true]}}"#
//! );
//! ```

pub mod codec;
pub mod collections;
pub mod core;
pub mod document;
pub mod error;

pub use crate::codec::{Codec, EncodeOptions, JsonCodec};
pub use crate::collections::{Array, Object};
pub use crate::core::{Path, PathSegment, SortedKeys, Value, ValueKind};
pub use crate::document::{Document, Elements, FromDocument, Structured};
pub use crate::error::{ValueError, ValueResult};

// Re-export serde_json::json! macro for convenience
pub use serde_json::json;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Codec, Document, EncodeOptions, FromDocument, JsonCodec, Structured, Value, ValueError,
        ValueKind, ValueResult,
    };

    pub use serde_json::json;
}
