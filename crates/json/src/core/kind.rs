//! Value kinds.
//!
//! `ValueKind` is the shape tag of a [`Value`](crate::Value): exactly one of
//! the six JSON shapes. It is total over `Value` and never fails.
//!
//! ```rust
//! use nebula_json::{Value, ValueKind};
//!
//! let v = Value::from(2.5);
//! assert_eq!(v.kind(), ValueKind::Number);
//! assert_eq!(ValueKind::Number.to_string(), "number");
//! ```

use core::fmt::{Display, Formatter};

/// Represents the shape of a Value
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Number,
    Bool,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
