//! Cast registry: conversions from raw strings (or defaults) to typed values.
//!
//! A [`Cast`] is a named conversion `&Value -> Value`. Raw source values
//! always arrive as [`Value::Str`]; defaults may arrive already typed, so
//! every built-in cast accepts its own output type unchanged.
//!
//! | Cast | Accepts | Produces |
//! |------|---------|----------|
//! | [`Cast::string`] | anything | strings (scalars are stringified) |
//! | [`Cast::boolean`] | `true`/`1`/`false`/`0` (any case), booleans | [`Value::Bool`] |
//! | [`Cast::integer`] | decimal integers, integers | [`Value::Int`] |
//! | [`Cast::float`] | decimal numbers, numbers | [`Value::Float`] |
//! | [`Cast::list`] | delimited strings, lists | [`Value::List`] |
//! | [`Cast::model`] | JSON documents, JSON objects | [`Value::Json`] |
//! | [`Cast::enumeration`] | variant names | [`Value::Str`] |
//! | [`Cast::choice`] | one of a fixed set of strings | [`Value::Str`] |
//! | [`Cast::json`] | any JSON document | matching [`Value`] |

mod list;
mod structured;

#[cfg(test)]
mod proptests;

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value::{Value, ValueType};

pub use list::{ListCast, DEFAULT_DELIMITER, DEFAULT_STRIP};

/// Signature of a cast function. Failures carry a message only; the field
/// name is attached by [`Cast::apply`].
pub type CastFn = dyn Fn(&Value) -> std::result::Result<Value, String> + Send + Sync;

/// The family a cast belongs to.
///
/// The resolver uses this to decide whether a structured default (a JSON
/// object) should be run through the cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    /// Identity.
    Str,
    /// Boolean parsing.
    Bool,
    /// Integer parsing.
    Int,
    /// Float parsing.
    Float,
    /// Delimited lists.
    List,
    /// Structured model validation.
    Model,
    /// Enumeration variant coercion.
    Enum,
    /// Fixed set of strings.
    Choice,
    /// Untyped JSON documents.
    Json,
    /// User-supplied conversion.
    Custom,
}

/// A conversion from a raw value to a typed value.
///
/// # Examples
///
/// ```
/// use configence::{Cast, Value};
///
/// let cast = Cast::boolean();
/// assert_eq!(cast.apply("IS_STRONG", &Value::from("TRUE")).unwrap(), Value::Bool(true));
/// assert!(cast.apply("IS_STRONG", &Value::from("maybe")).is_err());
/// ```
#[derive(Clone)]
pub struct Cast {
    kind: CastKind,
    value_type: ValueType,
    func: Arc<CastFn>,
}

impl Cast {
    /// Build a cast from a function.
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::{Cast, Value, ValueType};
    ///
    /// let upper = Cast::custom(ValueType::Str, |value| match value {
    ///     Value::Str(s) => Ok(Value::Str(s.to_uppercase())),
    ///     other => Err(format!("{other} is not a string")),
    /// });
    /// assert_eq!(upper.apply("NAME", &Value::from("goku")).unwrap(), Value::from("GOKU"));
    /// ```
    pub fn custom<F>(value_type: ValueType, func: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        Self::with_kind(CastKind::Custom, value_type, func)
    }

    pub(crate) fn with_kind<F>(kind: CastKind, value_type: ValueType, func: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            kind,
            value_type,
            func: Arc::new(func),
        }
    }

    /// String cast. Strings pass through; scalars are stringified.
    #[must_use]
    pub fn string() -> Self {
        Self::with_kind(CastKind::Str, ValueType::Str, |value| match value {
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => Ok(Value::Str(value.to_string())),
            other => Ok(other.clone()),
        })
    }

    /// Case-insensitive boolean cast.
    ///
    /// `"true"` and `"1"` are true, `"false"` and `"0"` are false. Anything
    /// else is a format error.
    #[must_use]
    pub fn boolean() -> Self {
        Self::with_kind(CastKind::Bool, ValueType::Bool, |value| match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::Str(s) => parse_bool(s).map(Value::Bool),
            other => Err(format!("{other} - is not a valid boolean")),
        })
    }

    /// Signed 64-bit integer cast.
    #[must_use]
    pub fn integer() -> Self {
        Self::with_kind(CastKind::Int, ValueType::Int, |value| match value {
            Value::Int(i) => Ok(Value::Int(*i)),
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| format!("'{s}' is not a valid integer: {e}")),
            other => Err(format!("{other} - is not a valid integer")),
        })
    }

    /// 64-bit float cast. Integers widen.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn float() -> Self {
        Self::with_kind(CastKind::Float, ValueType::Float, |value| match value {
            Value::Float(x) => Ok(Value::Float(*x)),
            Value::Int(i) => Ok(Value::Float(*i as f64)),
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| format!("'{s}' is not a valid float: {e}")),
            other => Err(format!("{other} - is not a valid float")),
        })
    }

    /// Delimited list cast. See [`ListCast`] for the splitting rules.
    #[must_use]
    pub fn list(list: ListCast) -> Self {
        Self::with_kind(CastKind::List, ValueType::List, move |value| list.cast(value))
    }

    /// A cast that accepts exactly the listed strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::{Cast, Value};
    ///
    /// let cast = Cast::choice(["low", "high"]);
    /// assert!(cast.apply("LEVEL", &Value::from("low")).is_ok());
    /// assert!(cast.apply("LEVEL", &Value::from("medium")).is_err());
    /// ```
    pub fn choice<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        Self::with_kind(CastKind::Choice, ValueType::Choice, move |value| {
            match value.as_str() {
                Some(s) if choices.iter().any(|c| c == s) => Ok(value.clone()),
                _ => Err(format!("{value} is not one of: {}", choices.join(", "))),
            }
        })
    }

    /// Run the cast, attributing failures to `field`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the value cannot be converted.
    pub fn apply(&self, field: &str, value: &Value) -> Result<Value> {
        (self.func)(value).map_err(|message| Error::Validation {
            field: field.to_string(),
            message,
        })
    }

    /// The family this cast belongs to.
    #[must_use]
    pub const fn kind(&self) -> CastKind {
        self.kind
    }

    /// The type this cast produces.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns true for casts that validate structured documents.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self.kind, CastKind::Model | CastKind::Json)
    }
}

impl Default for Cast {
    fn default() -> Self {
        Self::string()
    }
}

impl fmt::Debug for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cast")
            .field("kind", &self.kind)
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}

/// Parse a boolean value from a string.
///
/// Accepts: true/1 for true, false/0 for false (case-insensitive).
fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(format!("{s} - is not a valid boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_true_variants() {
        let cast = Cast::boolean();
        for raw in ["true", "TRUE", "True", "1"] {
            assert_eq!(cast.apply("B", &Value::from(raw)).unwrap(), Value::Bool(true));
        }
    }

    #[test]
    fn test_bool_false_variants() {
        let cast = Cast::boolean();
        for raw in ["false", "FALSE", "False", "0"] {
            assert_eq!(cast.apply("B", &Value::from(raw)).unwrap(), Value::Bool(false));
        }
    }

    #[test]
    fn test_bool_literal_passthrough() {
        let cast = Cast::boolean();
        assert_eq!(cast.apply("B", &Value::Bool(true)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_bool_invalid() {
        let cast = Cast::boolean();
        for raw in ["yes", "on", "", "2", "truthy"] {
            let err = cast.apply("IS_STRONG", &Value::from(raw)).unwrap_err();
            assert!(err.is_validation(), "{raw} should be rejected");
        }
        assert!(cast.apply("IS_STRONG", &Value::Int(1)).is_err());
    }

    #[test]
    fn test_integer() {
        let cast = Cast::integer();
        assert_eq!(cast.apply("N", &Value::from("8000")).unwrap(), Value::Int(8000));
        assert_eq!(cast.apply("N", &Value::from(" -12 ")).unwrap(), Value::Int(-12));
        assert_eq!(cast.apply("N", &Value::Int(9001)).unwrap(), Value::Int(9001));
        assert!(cast.apply("N", &Value::from("9000.5")).is_err());
        assert!(cast.apply("N", &Value::from("over nine thousand")).is_err());
    }

    #[test]
    fn test_float() {
        let cast = Cast::float();
        assert_eq!(cast.apply("F", &Value::from("1.25")).unwrap(), Value::Float(1.25));
        assert_eq!(cast.apply("F", &Value::Int(3)).unwrap(), Value::Float(3.0));
        assert!(cast.apply("F", &Value::from("fast")).is_err());
    }

    #[test]
    fn test_string_cast() {
        let cast = Cast::string();
        assert_eq!(cast.apply("S", &Value::from("None")).unwrap(), Value::from("None"));
        assert_eq!(cast.apply("S", &Value::from("")).unwrap(), Value::from(""));
        assert_eq!(cast.apply("S", &Value::Int(9001)).unwrap(), Value::from("9001"));
        assert_eq!(cast.apply("S", &Value::Null).unwrap(), Value::Null);
        assert_eq!(cast.kind(), CastKind::Str);
        assert_eq!(cast.value_type(), ValueType::Str);
    }

    #[test]
    fn test_choice_error_lists_choices() {
        let cast = Cast::choice(["low", "medium", "high"]);
        let err = cast.apply("LEVEL", &Value::from("over9000")).unwrap_err();
        let display = err.to_string();
        assert!(display.contains("LEVEL"));
        assert!(display.contains("low, medium, high"));
    }

    #[test]
    fn test_error_carries_field() {
        let err = Cast::integer()
            .apply("POWER_LEVEL", &Value::from("x"))
            .unwrap_err();
        match err {
            Error::Validation { field, .. } => assert_eq!(field, "POWER_LEVEL"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_debug_format() {
        let debug = format!("{:?}", Cast::boolean());
        assert!(debug.contains("Bool"));
    }
}
