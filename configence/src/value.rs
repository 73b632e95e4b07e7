//! Dynamic values held by configuration entries.
//!
//! Resolved entries are heterogeneous, so the holder stores them as
//! [`Value`]. Typed access goes through serde: every value has a JSON form
//! and any `DeserializeOwned` type can be read back out of it.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A resolved configuration value.
///
/// # Examples
///
/// ```
/// use configence::Value;
///
/// let level = Value::from(9001);
/// assert_eq!(level.to_string(), "9001");
///
/// let hero = Value::from("Son Goku");
/// assert_eq!(hero.repr(), "\"Son Goku\"");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value (an explicit `null` default).
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A structured document (model entries).
    Json(serde_json::Value),
}

impl Value {
    /// Convert a JSON document into a value.
    ///
    /// Scalars and arrays map onto the matching variants; objects stay
    /// structured as [`Value::Json`].
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_json).collect())
            }
            object @ serde_json::Value::Object(_) => Self::Json(object),
        }
    }

    /// The JSON form of this value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Str(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Json(json) => json.clone(),
        }
    }

    /// Serialize an already-typed Rust value into a [`Value`].
    ///
    /// # Errors
    ///
    /// Returns an error if `T` cannot be represented as JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::Value;
    ///
    /// let value = Value::from_serialize(&vec![1, 3, 43]).unwrap();
    /// assert_eq!(value, Value::from(vec![1, 3, 43]));
    /// ```
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::from_json(serde_json::to_value(value)?))
    }

    /// Deserialize this value into a Rust type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value does not fit `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        serde_json::from_value(self.to_json()).map_err(|e| Error::TypeMismatch {
            name: name.to_string(),
            expected: std::any::type_name::<T>(),
            message: e.to_string(),
        })
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The string slice, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Debug-style rendering: strings are quoted, lists show their items'
    /// reprs, everything else matches [`Display`](fmt::Display).
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Str(s) => format!("{s:?}"),
            Self::List(items) => {
                let inner: Vec<String> = items.iter().map(Self::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::List(_) | Self::Json(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u16> for Value {
    fn from(i: u16) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Self::from_json(json)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// The declared type of an entry, used for CLI exposure and introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Plain string.
    Str,
    /// Signed integer.
    Int,
    /// Boolean.
    Bool,
    /// Floating point number.
    Float,
    /// Delimited list.
    List,
    /// Structured model, named by its Rust type.
    Model(&'static str),
    /// Enumeration, named by its Rust type.
    Enum(&'static str),
    /// One of a fixed set of strings.
    Choice,
    /// Untyped structured JSON.
    Json,
}

impl ValueType {
    /// Infer a declared type from a resolved value.
    ///
    /// Used for entries synthesized from top-level delayed values.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null | Value::Str(_) => Self::Str,
            Value::Bool(_) => Self::Bool,
            Value::Int(_) => Self::Int,
            Value::Float(_) => Self::Float,
            Value::List(_) => Self::List,
            Value::Json(_) => Self::Json,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => write!(f, "str"),
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
            Self::Float => write!(f, "float"),
            Self::List => write!(f, "list"),
            Self::Model(name) | Self::Enum(name) => write!(f, "{name}"),
            Self::Choice => write!(f, "choice"),
            Self::Json => write!(f, "json"),
        }
    }
}
