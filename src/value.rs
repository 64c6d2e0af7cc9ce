//! Value types that record fields can hold.
//!
//! Lead records carry an open-ended field schema: beyond the identity
//! fields, any field name may appear with any JSON value. [`Value`] is the
//! variant type those fields are stored as. It is serialized untagged, so a
//! `Value` reads and writes as the bare JSON value and unknown fields pass
//! through a run verbatim.

use serde::{Deserialize, Serialize};

/// Possible values a record field can hold.
///
/// Scalar JSON values map onto the dedicated variants; arrays and objects
/// are carried as [`Value::Structured`] so nothing is lost in transit.
/// Equality is structural: `Value::Int(1)` and `Value::Float(1.0)` are
/// distinct values.
///
/// # Examples
///
/// ```
/// use leadrec::Value;
///
/// let v: Value = serde_json::from_str("\"ada@example.com\"").unwrap();
/// assert_eq!(v.as_str(), Some("ada@example.com"));
/// assert_eq!(serde_json::to_string(&v).unwrap(), "\"ada@example.com\"");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(String),
    /// An explicit JSON `null`. Also stands in for an absent field when
    /// diffing two records.
    Null,
    /// A nested array or object, preserved verbatim.
    Structured(serde_json::Value),
}

impl Value {
    /// Returns true if this is an explicit null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if this is a string.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The canonical string form used as an identity-index key.
    ///
    /// Only scalar values can key an index; `Null` and structured values
    /// return `None`.
    #[must_use]
    pub fn as_key(&self) -> Option<String> {
        match self {
            Self::Bool(v) => Some(v.to_string()),
            Self::Int(v) => Some(v.to_string()),
            Self::Float(v) => Some(v.to_string()),
            Self::String(v) => Some(v.clone()),
            Self::Null | Self::Structured(_) => None,
        }
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Null => "null",
            Self::Structured(_) => "structured",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Null => write!(f, "null"),
            Self::Structured(v) => write!(f, "{v}"),
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            serde_json::Value::String(s) => Self::String(s),
            other => Self::Structured(other),
        }
    }
}
