//! Display implementation for Value
//!
//! `{}` writes compact JSON in storage order, `{:#}` writes indented JSON
//! with sorted keys. Display never fails: non-finite numbers, which have
//! no JSON form, are written as `null`. Use the codec for strict output.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::core::value::Value;

struct Displayed<'a> {
    value: &'a Value,
    sorted: bool,
}

impl<'a> Displayed<'a> {
    fn child(&self, value: &'a Value) -> Self {
        Self {
            value,
            sorted: self.sorted,
        }
    }
}

impl Serialize for Displayed<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.value {
            Value::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                if self.sorted {
                    for (key, value) in obj.sorted_entries() {
                        map.serialize_entry(key, &self.child(value))?;
                    }
                } else {
                    for (key, value) in obj.entries() {
                        map.serialize_entry(key, &self.child(value))?;
                    }
                }
                map.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let displayed = Displayed {
            value: self,
            sorted: f.alternate(),
        };
        let text = if f.alternate() {
            serde_json::to_string_pretty(&displayed)
        } else {
            serde_json::to_string(&displayed)
        }
        .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
