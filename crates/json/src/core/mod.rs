//! Core building blocks for the JSON value model.
//!
//! ## Core Components
//!
//! ### [`value`] - The Value enum
//!
//! The central [`Value`] enum represents exactly the six JSON shapes, with
//! persistent containers so that cloning is cheap.
//!
//! ### [`kind`] - Shape classification
//!
//! [`ValueKind`] names a shape without carrying data. It is what shape
//! mismatch errors report.
//!
//! ### [`path`] - Value navigation
//!
//! Dot notation and array indexing over nested values.
//!
//! ### [`serde`] - Encode and decode contracts
//!
//! `Serialize`/`Deserialize` for [`Value`], the [`SortedKeys`] adapter and
//! the bridge to `serde_json::Value`.

pub mod display;
pub mod hash;
pub mod kind;
pub mod path;
pub mod serde;
pub mod value;

pub use kind::ValueKind;
pub use path::{MAX_PATH_SEGMENTS, Path, PathSegment};
pub use self::serde::{MAX_SAFE_INTEGER, SortedKeys};
pub use value::Value;
