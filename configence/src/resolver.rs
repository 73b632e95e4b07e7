//! Single-entry resolution.
//!
//! [`Resolver`] applies the lookup policy for one key: prefix the key, ask
//! the source, cast a hit, and otherwise fall back to the default. It is
//! also the immediate-mode API: each typed method resolves and returns a
//! value right away, without declaring anything.
//!
//! # Default policy
//!
//! When the source has no value for the key:
//!
//! | Default | Result |
//! |---------|--------|
//! | none | [`Error::NotFound`] |
//! | string | the string, cast |
//! | JSON object, structured cast | the object, cast |
//! | delayed | pending (resolved later by the holder) |
//! | anything else | the default, unchanged |
//!
//! # Examples
//!
//! ```
//! use configence::source::MapSource;
//! use configence::Resolver;
//!
//! let source = MapSource::from_pairs([("IS_STRONG", "1"), ("NEW_MY_HERO", "Vegeta")]);
//!
//! let resolver = Resolver::new(&source);
//! assert_eq!(resolver.str("MY_HERO", Some("Son Goku")).unwrap(), "Son Goku");
//! assert!(resolver.bool("IS_STRONG", Some(false)).unwrap());
//!
//! let prefixed = Resolver::new(&source).with_prefix("NEW_");
//! assert_eq!(prefixed.str("MY_HERO", Some("Son Goku")).unwrap(), "Vegeta");
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cast::{Cast, ListCast};
use crate::entry::{Entry, EntryDefault};
use crate::error::{Error, Result};
use crate::source::ValueSource;
use crate::value::Value;

/// Resolves keys against a source, with an optional key prefix.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    source: &'a dyn ValueSource,
    prefix: Option<&'a str>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with no prefix.
    #[must_use]
    pub fn new(source: &'a dyn ValueSource) -> Self {
        Self {
            source,
            prefix: None,
        }
    }

    /// Prepend `prefix` to every key. An empty prefix means no prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix).filter(|p| !p.is_empty());
        self
    }

    /// The active prefix, if any.
    #[must_use]
    pub const fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    /// The key actually looked up in the source.
    #[must_use]
    pub fn effective_key(&self, key: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{prefix}{key}"),
            None => key.to_string(),
        }
    }

    /// Resolve a key with the full default policy.
    ///
    /// Returns `Ok(None)` when the key is absent and the default is
    /// delayed; the caller evaluates it later.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is absent and there is no
    /// default, or [`Error::Validation`] if a cast fails.
    pub fn resolve(
        &self,
        key: &str,
        default: &EntryDefault,
        cast: &Cast,
        cast_from_json: Option<&Cast>,
    ) -> Result<Option<Value>> {
        let effective = self.effective_key(key);

        if let Some(raw) = self.source.get(&effective) {
            log::debug!("Found {effective} in {}", self.source.describe());
            return logged(cast.apply(&effective, &Value::Str(raw))).map(Some);
        }

        match default {
            EntryDefault::Undefined => Err(Error::NotFound { key: effective }),
            EntryDefault::Delayed(_) => {
                log::debug!("{effective} not set, delayed default pending");
                Ok(None)
            }
            EntryDefault::Value(value) => {
                log::debug!("{effective} not set, using default");
                logged(apply_default(&effective, value, cast, cast_from_json)).map(Some)
            }
        }
    }

    /// Resolve an entry using its key, default and casts.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn resolve_entry(&self, entry: &Entry) -> Result<Option<Value>> {
        self.resolve(
            entry.key(),
            entry.default(),
            entry.cast(),
            entry.cast_from_json(),
        )
    }

    /// Resolve a key with an optional literal default and any cast.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn value(&self, key: &str, default: Option<Value>, cast: &Cast) -> Result<Value> {
        let default = default.map_or(EntryDefault::Undefined, EntryDefault::Value);
        let cast_from_json = cast.is_structured().then_some(cast);
        self.resolve(key, &default, cast, cast_from_json)?
            .ok_or_else(|| Error::NotFound {
                key: self.effective_key(key),
            })
    }

    fn typed<T: DeserializeOwned>(
        &self,
        key: &str,
        default: Option<Value>,
        cast: &Cast,
    ) -> Result<T> {
        self.value(key, default, cast)?.deserialize_into(key)
    }

    /// Resolve a string.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn str(&self, key: &str, default: Option<&str>) -> Result<String> {
        self.typed(key, default.map(Value::from), &Cast::string())
    }

    /// Resolve an integer.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn int(&self, key: &str, default: Option<i64>) -> Result<i64> {
        self.typed(key, default.map(Value::from), &Cast::integer())
    }

    /// Resolve a boolean.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn bool(&self, key: &str, default: Option<bool>) -> Result<bool> {
        self.typed(key, default.map(Value::from), &Cast::boolean())
    }

    /// Resolve a float.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn float(&self, key: &str, default: Option<f64>) -> Result<f64> {
        self.typed(key, default.map(Value::from), &Cast::float())
    }

    /// Resolve a delimited list. The default is used as-is, without casting.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::cast::ListCast;
    /// use configence::source::MapSource;
    /// use configence::Resolver;
    ///
    /// let source = MapSource::from_pairs([("EVENTS", "event3,event4,event5")]);
    /// let events: Vec<String> = Resolver::new(&source)
    ///     .list("EVENTS", Some(vec!["event1".to_string()]), ListCast::new())
    ///     .unwrap();
    /// assert_eq!(events, ["event3", "event4", "event5"]);
    /// ```
    pub fn list<T>(&self, key: &str, default: Option<Vec<T>>, list: ListCast) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let default = default.map(|d| Value::from_serialize(&d)).transpose()?;
        self.typed(key, default, &Cast::list(list))
    }

    /// Resolve a structured model from a JSON document.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn model<T>(&self, key: &str, default: Option<T>) -> Result<T>
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        let default = default.map(|d| Value::from_serialize(&d)).transpose()?;
        self.typed(key, default, &Cast::model::<T>())
    }

    /// Resolve an enumeration variant.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn enumeration<T>(&self, key: &str, default: Option<T>) -> Result<T>
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        let default = default.map(|d| Value::from_serialize(&d)).transpose()?;
        self.typed(key, default, &Cast::enumeration::<T>())
    }
}

/// Apply the default policy to a literal default (or an evaluated delayed
/// default): strings are cast, JSON objects go through the structured cast
/// if there is one, everything else is returned unchanged.
///
/// # Errors
///
/// Returns [`Error::Validation`] if a cast fails.
pub fn apply_default(
    field: &str,
    default: &Value,
    cast: &Cast,
    cast_from_json: Option<&Cast>,
) -> Result<Value> {
    match (default, cast_from_json) {
        (Value::Str(_), _) => cast.apply(field, default),
        (Value::Json(json), Some(structured)) if json.is_object() => {
            structured.apply(field, default)
        }
        (other, _) => Ok(other.clone()),
    }
}

fn logged(result: Result<Value>) -> Result<Value> {
    result.map_err(|err| {
        log::error!("{err}");
        err
    })
}
