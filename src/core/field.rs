//! Attribute value types shared by every record

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A polymorphic attribute value that can hold the scalar types a record exposes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

/// The type class of a [`FieldValue`], used by the sort comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get any numeric value as a float
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Type class of this value; `None` for null
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::String(_) => Some(FieldKind::String),
            FieldValue::Integer(_) | FieldValue::Float(_) => Some(FieldKind::Number),
            FieldValue::Boolean(_) => Some(FieldKind::Boolean),
            FieldValue::Null => None,
        }
    }

    /// Convert a JSON scalar into a field value
    ///
    /// Arrays and objects are not attributes and yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(FieldValue::String(s.clone())),
            serde_json::Value::Bool(b) => Some(FieldValue::Boolean(*b)),
            serde_json::Value::Number(n) => Some(match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            serde_json::Value::Null => Some(FieldValue::Null),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    /// Compare two values of the same type class
    ///
    /// Returns `None` when the pair is not comparable (different classes or null).
    /// Booleans order `true` before `false`.
    pub fn compare_same_kind(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => Some(collate(a, b)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => Some(b.cmp(a)),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => Some(a.total_cmp(&b)),
                _ => None,
            },
        }
    }
}

/// Case-folded collation with the raw strings as tiebreak
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Null => Ok(()),
        }
    }
}

/// Conversion from a typed struct field into an attribute value
///
/// Implemented for the scalar types entity models use, so the
/// `impl_record!` macro can expose fields without per-type code.
pub trait AsFieldValue {
    fn as_field_value(&self) -> FieldValue;
}

impl AsFieldValue for String {
    fn as_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl AsFieldValue for bool {
    fn as_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl AsFieldValue for i64 {
    fn as_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl AsFieldValue for u32 {
    fn as_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl AsFieldValue for f64 {
    fn as_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    fn as_field_value(&self) -> FieldValue {
        match self {
            Some(value) => value.as_field_value(),
            None => FieldValue::Null,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}
