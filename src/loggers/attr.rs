//! # Structured Attributes
//!
//! Key/value pairs attached to a [`LogRecord`](crate::loggers::core::LogRecord).
//! Attributes are plain tagged values: they carry no behavior beyond pairing a key
//! with a typed payload. Order and duplicates are kept as given; resolving duplicate
//! keys is left to the sink.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Typed payload of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    String(String),
    Int(i64),
    Bool(bool),
    Float64(f64),
    Time(DateTime<Utc>),
}

impl AttrValue {
    /// Name of the payload kind, as used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            AttrValue::String(_) => "string",
            AttrValue::Int(_) => "int",
            AttrValue::Bool(_) => "bool",
            AttrValue::Float64(_) => "float64",
            AttrValue::Time(_) => "time",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            AttrValue::Time(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => write!(f, "{}", s),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Bool(v) => write!(f, "{}", v),
            AttrValue::Float64(v) => write!(f, "{}", v),
            AttrValue::Time(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::String(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::String(v)
    }
}

impl From<&String> for AttrValue {
    fn from(v: &String) -> Self {
        AttrValue::String(v.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float64(v)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        AttrValue::Float64(v as f64)
    }
}

impl From<DateTime<Utc>> for AttrValue {
    fn from(v: DateTime<Utc>) -> Self {
        AttrValue::Time(v)
    }
}

// Lossless into i64 only; wider unsigned types are left out so they cannot wrap.
macro_rules! int_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AttrValue {
                fn from(v: $t) -> Self {
                    AttrValue::Int(v as i64)
                }
            }
        )*
    };
}

int_from!(i8, i16, i32, i64, isize, u8, u16, u32);

/// A single `key = value` attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attr {
    pub key: String,
    pub value: AttrValue,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Creates an attribute with a string value.
pub fn string(key: &str, value: &str) -> Attr {
    Attr::new(key, AttrValue::String(value.to_string()))
}

/// Creates an attribute with an integer value.
pub fn int(key: &str, value: i64) -> Attr {
    Attr::new(key, AttrValue::Int(value))
}

/// Creates an attribute with a boolean value.
pub fn bool(key: &str, value: bool) -> Attr {
    Attr::new(key, AttrValue::Bool(value))
}

/// Creates an attribute with a float value.
pub fn float64(key: &str, value: f64) -> Attr {
    Attr::new(key, AttrValue::Float64(value))
}

/// Creates an attribute with a timestamp value.
pub fn time(key: &str, value: DateTime<Utc>) -> Attr {
    Attr::new(key, AttrValue::Time(value))
}
