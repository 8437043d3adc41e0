//! Path expressions for nested access
//!
//! Supports dotted keys and bracketed indices: `user.addresses[0].city`,
//! `matrix[0][1]`, with an optional leading `$` or `$.`. Keys containing
//! `.` or `[` cannot be expressed; use the keyed accessors for those.

use std::fmt;
use std::str::FromStr;

use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};

/// Maximum number of path segments allowed
pub const MAX_PATH_SEGMENTS: usize = 100;

/// Path segment for navigating values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key access: .key
    Key(String),
    /// Array index access: [index]
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A parsed path expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path, which addresses the root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a path expression
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidPath` for unbalanced brackets, non-numeric
    /// indices, empty keys, or more than [`MAX_PATH_SEGMENTS`] segments.
    pub fn parse(path: &str) -> ValueResult<Self> {
        let body = path
            .strip_prefix("$.")
            .or_else(|| path.strip_prefix('$'))
            .unwrap_or(path);

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut after_index = false;
        let mut chars = body.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if current.is_empty() && !after_index {
                        return Err(ValueError::invalid_path(path, "empty key"));
                    }
                    if !current.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current)));
                    }
                    after_index = false;
                }
                '[' => {
                    if !current.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current)));
                    }

                    let mut index_str = String::new();
                    let mut closed = false;
                    for ch in chars.by_ref() {
                        if ch == ']' {
                            closed = true;
                            break;
                        }
                        index_str.push(ch);
                    }
                    if !closed {
                        return Err(ValueError::invalid_path(path, "unclosed '['"));
                    }

                    let index = index_str.trim().parse::<usize>().map_err(|_| {
                        ValueError::invalid_path(path, format!("'{index_str}' is not an index"))
                    })?;
                    segments.push(PathSegment::Index(index));
                    after_index = true;
                }
                ']' => return Err(ValueError::invalid_path(path, "unexpected ']'")),
                _ => {
                    if after_index && current.is_empty() && !segments.is_empty() {
                        // `a[0]b` has no separator between the index and the key
                        return Err(ValueError::invalid_path(path, "expected '.' or '['"));
                    }
                    current.push(ch);
                }
            }

            if segments.len() > MAX_PATH_SEGMENTS {
                return Err(ValueError::invalid_path(
                    path,
                    format!("more than {MAX_PATH_SEGMENTS} segments"),
                ));
            }
        }

        if !current.is_empty() {
            segments.push(PathSegment::Key(current));
        } else if body.ends_with('.') {
            return Err(ValueError::invalid_path(path, "empty key"));
        }

        if segments.len() > MAX_PATH_SEGMENTS {
            return Err(ValueError::invalid_path(
                path,
                format!("more than {MAX_PATH_SEGMENTS} segments"),
            ));
        }

        Ok(Self { segments })
    }

    /// The parsed segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Check if this path addresses the root
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a key segment
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Append an index segment
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }
}

impl FromStr for Path {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(_) => write!(f, "{segment}")?,
            }
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Value {
    // ==================== Path-based Access ====================

    /// Follow `path` from this value
    ///
    /// Returns `None` as soon as a segment does not resolve: a key on a
    /// non-object, a missing key, an index on a non-array or out of bounds.
    #[must_use]
    pub fn at_path(&self, path: &Path) -> Option<&Value> {
        path.segments
            .iter()
            .try_fold(self, |current, segment| match segment {
                PathSegment::Key(key) => current.get_key(key),
                PathSegment::Index(index) => current.get_index(*index),
            })
    }

    /// Follow `path`, reporting which segment failed
    ///
    /// # Errors
    ///
    /// `ShapeMismatch`, `KeyNotFound` or `IndexOutOfBounds`, wrapped with
    /// the path prefix that was resolved so far.
    pub fn try_at_path(&self, path: &Path) -> ValueResult<&Value> {
        let mut current = self;
        let mut walked = Path::root();
        for segment in &path.segments {
            let next = match segment {
                PathSegment::Key(key) => current.try_object().and_then(|obj| obj.try_get(key)),
                PathSegment::Index(index) => {
                    current.try_array().and_then(|arr| arr.try_get(*index))
                }
            };
            current = next.map_err(|e| e.with_context(format!("at path: {walked}")))?;
            walked.segments.push(segment.clone());
        }
        Ok(current)
    }

    /// Get value from object by key (if this is an object)
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Get value from array by index (if this is an array)
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|arr| arr.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kind::ValueKind;

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_string())
    }

    #[test]
    fn test_parse_path_simple() {
        let path = Path::parse("user").unwrap();
        assert_eq!(path.segments(), [key("user")]);
    }

    #[test]
    fn test_parse_path_nested() {
        let path = Path::parse("$.user.name").unwrap();
        assert_eq!(path.segments(), [key("user"), key("name")]);
    }

    #[test]
    fn test_parse_path_complex() {
        let path = Path::parse("data[0].value").unwrap();
        assert_eq!(
            path.segments(),
            [key("data"), PathSegment::Index(0), key("value")]
        );
    }

    #[test]
    fn test_parse_path_multiple_indices() {
        let path = Path::parse("matrix[0][1]").unwrap();
        assert_eq!(
            path.segments(),
            [key("matrix"), PathSegment::Index(0), PathSegment::Index(1)]
        );
    }

    #[test]
    fn test_parse_path_leading_index() {
        let path = Path::parse("[2].name").unwrap();
        assert_eq!(path.segments(), [PathSegment::Index(2), key("name")]);
    }

    #[test]
    fn test_parse_root() {
        assert!(Path::parse("").unwrap().is_root());
        assert!(Path::parse("$").unwrap().is_root());
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["a..b", "a[", "a[x]", "a]", "a.", "a[0]b", ".a"] {
            let err = Path::parse(bad).unwrap_err();
            assert_eq!(err.code(), "JSON_INVALID_PATH", "{bad}");
        }
    }

    #[test]
    fn test_parse_segment_limit() {
        let long = vec!["k"; MAX_PATH_SEGMENTS + 1].join(".");
        assert!(Path::parse(&long).is_err());
        let ok = vec!["k"; MAX_PATH_SEGMENTS].join(".");
        assert!(Path::parse(&ok).is_ok());
    }

    #[test]
    fn test_display_roundtrip() {
        let path = Path::root().key("a").index(3).key("b");
        assert_eq!(path.to_string(), "$.a[3].b");
        assert_eq!(Path::parse(&path.to_string()).unwrap(), path);
    }

    #[test]
    fn test_at_path() {
        let val: Value = r#"{"a": {"b": [10, {"c": true}]}}"#.parse().unwrap();
        let path = Path::parse("a.b[1].c").unwrap();
        assert_eq!(val.at_path(&path), Some(&Value::bool(true)));
        assert_eq!(val.at_path(&Path::parse("a.b[5]").unwrap()), None);
        assert_eq!(val.at_path(&Path::root()), Some(&val));
    }

    #[test]
    fn test_try_at_path_reports_shape() {
        let val: Value = r#"{"a": [1]}"#.parse().unwrap();
        let err = val.try_at_path(&Path::parse("a.b").unwrap()).unwrap_err();
        assert_eq!(
            err.root(),
            &ValueError::shape_mismatch(ValueKind::Object, ValueKind::Array)
        );
        assert!(err.to_string().contains("$.a"));
    }

    #[test]
    fn test_get_key_type_mismatch() {
        assert!(Value::number(42.0).get_key("foo").is_none());
        assert!(Value::string("hello").get_index(0).is_none());
    }
}
