//! Error types for the configence library.
//!
//! This module provides the error hierarchy for resolving configuration
//! entries, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a configence error.
///
/// # Examples
///
/// ```
/// use configence::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(9001)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the configence library.
///
/// Hard errors abort the construction of a configuration holder. Unresolved
/// references inside delayed values are not errors and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// The lookup key is missing from the source and no default was given.
    #[error("value not found: {key} is not set and has no default")]
    NotFound {
        /// The effective (prefixed) key that was looked up.
        key: String,
    },

    /// A raw value was present but failed its cast or schema validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The key or entry name that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The same entry name was declared twice on one schema.
    #[error("duplicate entry: {name} is already declared")]
    DuplicateEntry {
        /// The repeated entry name.
        name: String,
    },

    /// An entry or attribute name that the holder does not know.
    #[error("unknown entry: {name}")]
    UnknownEntry {
        /// The requested name.
        name: String,
    },

    /// A resolved value could not be extracted as the requested type.
    #[error("cannot read '{name}' as {expected}: {message}")]
    TypeMismatch {
        /// The entry or attribute name.
        name: String,
        /// The requested Rust type.
        expected: &'static str,
        /// Details from the deserializer.
        message: String,
    },

    /// A schema file could not be parsed.
    #[error("schema error: {0}")]
    Schema(#[from] serde_yaml::Error),

    /// A JSON document could not be produced or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a validation error for a key.
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if error indicates a missing value.
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::Error;
    ///
    /// let err = Error::NotFound { key: "MY_HERO".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is a cast or schema validation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::Error;
    ///
    /// let err = Error::Validation {
    ///     field: "IS_STRONG".to_string(),
    ///     message: "maybe is not a valid boolean".to_string(),
    /// };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
