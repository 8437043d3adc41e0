//! Structural equality and hashing for Value
//!
//! Two values are equal iff they have the same shape and recursively equal
//! contents. Object equality ignores key order, array equality does not.
//!
//! Numbers compare with `==` except that every NaN equals every other NaN,
//! which keeps `Eq` reflexive. Hashing follows the same rules: `+0.0` and
//! `-0.0` hash alike and all NaN payloads hash alike.

use std::hash::{Hash, Hasher};

use crate::core::value::Value;

#[inline]
fn numbers_equal(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

#[inline]
fn number_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0.0_f64.to_bits()
    } else {
        n.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Number(a), Self::Number(b)) => numbers_equal(*a, *b),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);

        match self {
            Self::Null => {}
            Self::Number(n) => number_bits(*n).hash(state),
            Self::Bool(b) => b.hash(state),
            Self::String(s) => s.hash(state),
            Self::Array(arr) => arr.hash(state),
            Self::Object(obj) => obj.hash(state),
        }
    }
}
