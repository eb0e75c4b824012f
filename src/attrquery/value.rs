//! Attribute value types.
//!
//! This module defines the runtime representation of the value a leaf
//! predicate compares against.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Runtime representation of an attribute value.
///
/// Every variant is hashable and totally ordered so leaves can be
/// deduplicated and compared structurally.
///
/// Serialization is untagged and output only. An untagged instant reads back
/// as a plain string, so there is no `Deserialize`:
///
/// ```compile_fail
/// let value: attrquery::AttrValue = serde_json::from_str("\"AIA\"").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Free-form string (e.g. an instrument name, `"AIA"`)
    Str(String),

    /// Integer value (e.g. a processing level or a wavelength in Ångström)
    Int(i64),

    /// Boolean flag
    Bool(bool),

    /// A single instant
    Time(DateTime<Utc>),

    /// Closed instant interval, `start <= end`
    TimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl AttrValue {
    /// Get the string value if this is a Str.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer value if this is an Int.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the boolean value if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the `(start, end)` pair if this is a TimeRange.
    pub fn as_time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self {
            AttrValue::TimeRange { start, end } => Some((*start, *end)),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => write!(f, "{:?}", s),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Bool(v) => write!(f, "{}", v),
            AttrValue::Time(t) => write!(f, "{}", t.format("%Y-%m-%dT%H:%M:%S%.3f")),
            AttrValue::TimeRange { start, end } => write!(
                f,
                "{} to {}",
                start.format("%Y-%m-%dT%H:%M:%S%.3f"),
                end.format("%Y-%m-%dT%H:%M:%S%.3f")
            ),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v.into())
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<DateTime<Utc>> for AttrValue {
    fn from(t: DateTime<Utc>) -> Self {
        AttrValue::Time(t)
    }
}
