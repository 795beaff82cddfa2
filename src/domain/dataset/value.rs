//! Cell values of a tabular dataset.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Label;

/// A single cell in a dataset column.
///
/// Deserializes untagged, so a JSON or YAML column such as
/// `["small", 1, 0.0, true, null]` maps onto the matching variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Interprets the value as a binary outcome.
    ///
    /// Accepts booleans and the numbers 0 and 1; everything else is `None`.
    pub fn as_outcome(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            Value::Float(f) if *f == 0.0 => Some(false),
            Value::Float(f) if *f == 1.0 => Some(true),
            _ => None,
        }
    }

    /// Interprets the value as a non-negative integer count.
    ///
    /// Integral floats are accepted since counts often round-trip through
    /// floating point columns.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Value::Int(i) => u64::try_from(*i).ok(),
            // `u64::MAX as f64` rounds up to 2^64, which does not fit.
            Value::Float(f) if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64 => {
                Some(*f as u64)
            }
            _ => None,
        }
    }

    /// Interprets the value as a category label.
    ///
    /// Returns the reason as an error when the value cannot name a category.
    pub fn as_label(&self) -> Result<Label, &'static str> {
        match self {
            Value::Null => Err("value is null"),
            Value::Text(s) if s.trim().is_empty() => Err("label is blank"),
            Value::Text(s) => Ok(Label::new(s.clone())),
            Value::Bool(b) => Ok(Label::new(b.to_string())),
            Value::Int(i) => Ok(Label::new(i.to_string())),
            Value::Float(f) if !f.is_finite() => Err("label is not a finite number"),
            Value::Float(f) => Ok(Label::new(f.to_string())),
        }
    }

    /// Names the kind of value, with integers and floats both `number`.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::Text(_) => "text",
        }
    }

    /// Returns true if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Value::Int)
            .unwrap_or(Value::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&Label> for Value {
    fn from(value: &Label) -> Self {
        Value::Text(value.as_str().to_string())
    }
}
