//! The configuration holder.
//!
//! A [`Config`] is what a [`Schema`](crate::schema::Schema) load produces:
//! the resolved attributes, the entry registry they came from, and the
//! phase the holder is in. Attributes are either entry values or derived
//! values assigned by the load hook.

pub(crate) mod engine;
#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::value::Value;

/// Lifecycle phase of a holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Members are being resolved in declaration order.
    Declaring,
    /// Delayed defaults and the load hook are running.
    Evaluating,
    /// Loading finished.
    Loaded,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaring => write!(f, "declaring"),
            Self::Evaluating => write!(f, "evaluating"),
            Self::Loaded => write!(f, "loaded"),
        }
    }
}

/// Resolved configuration.
///
/// # Examples
///
/// ```
/// use configence::source::MapSource;
/// use configence::Schema;
///
/// let mut schema = Schema::new("HeroConfig");
/// schema.str("MY_HERO").default("Son Goku");
///
/// let mut config = schema.load(&MapSource::new()).unwrap();
/// config.set("MY_HERO", "Vegeta").unwrap();
/// assert_eq!(config.get::<String>("MY_HERO").unwrap(), "Vegeta");
/// assert_eq!(
///     config.entry("MY_HERO").unwrap().value().unwrap().to_string(),
///     "Vegeta"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    prefix: Option<String>,
    pub(crate) phase: Phase,
    pub(crate) entries: Vec<Entry>,
    values: BTreeMap<String, Value>,
    pub(crate) delayed_count: usize,
    pub(crate) delayed_default_count: usize,
}

impl Config {
    pub(crate) fn declaring(name: &str, prefix: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            prefix: prefix.map(str::to_string),
            phase: Phase::Declaring,
            entries: Vec::new(),
            values: BTreeMap::new(),
            delayed_count: 0,
            delayed_default_count: 0,
        }
    }

    /// Add a resolved (or pending) entry.
    pub(crate) fn register(&mut self, mut entry: Entry, value: Option<Value>) {
        if let Some(value) = &value {
            self.values.insert(entry.name().to_string(), value.clone());
        }
        entry.value = value;
        self.entries.push(entry);
    }

    /// Write an attribute and, if it is an entry, the entry value.
    pub(crate) fn assign(&mut self, name: &str, value: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name() == name) {
            entry.value = Some(value.clone());
        }
        self.values.insert(name.to_string(), value);
    }

    /// Schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The prefix keys were resolved with, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true once loading has finished.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.phase == Phase::Loaded
    }

    /// Registered entries, in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// The value of an attribute (entry or derived).
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns true if `name` is a resolved attribute.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// All attributes, sorted by name.
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Read an attribute as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEntry`] if there is no such attribute, or
    /// [`Error::TypeMismatch`] if it does not fit `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.values
            .get(name)
            .ok_or_else(|| Error::UnknownEntry {
                name: name.to_string(),
            })?
            .deserialize_into(name)
    }

    /// Replace the value of an existing attribute. Entry values are
    /// updated with it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEntry`] if there is no such attribute.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        if !self.contains(name) && self.entry(name).is_none() {
            return Err(Error::UnknownEntry {
                name: name.to_string(),
            });
        }
        self.assign(name, value.into());
        Ok(())
    }

    /// Assign a derived attribute. Derived attributes are readable like
    /// entries but are not part of the entry registry.
    pub fn derive(&mut self, name: &str, value: impl Into<Value>) {
        self.assign(name, value.into());
    }

    /// Number of top-level delayed members.
    #[must_use]
    pub const fn delayed_count(&self) -> usize {
        self.delayed_count
    }

    /// Number of entries whose default is delayed.
    #[must_use]
    pub const fn delayed_default_count(&self) -> usize {
        self.delayed_default_count
    }

    /// Entry names mapped to display strings, sorted by name.
    #[must_use]
    pub fn to_string_map(&self) -> BTreeMap<&str, String> {
        self.entries
            .iter()
            .map(|entry| {
                let shown = entry.value().map_or_else(String::new, ToString::to_string);
                (entry.name(), shown)
            })
            .collect()
    }

    /// Debug form: one `NAME: repr` line per entry, sorted by name.
    ///
    /// Values use [`Value::repr`]: strings are double-quoted, and other
    /// scalars keep their JSON spelling (`true`, `false`, `null`, `9001`).
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::source::MapSource;
    /// use configence::Schema;
    ///
    /// let mut schema = Schema::new("HeroConfig");
    /// schema.str("MY_HERO").default("Son Goku");
    /// schema.int("POWER_LEVEL").default(9001);
    ///
    /// let config = schema.load(&MapSource::new()).unwrap();
    /// assert_eq!(
    ///     config.debug_repr(),
    ///     "HeroConfig(Configence):\n    MY_HERO: \"Son Goku\"\n    POWER_LEVEL: 9001\n"
    /// );
    /// ```
    #[must_use]
    pub fn debug_repr(&self) -> String {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));

        let mut out = format!("{}(Configence):\n", self.name);
        for entry in entries {
            let repr = entry.value().map_or_else(|| "<pending>".to_string(), Value::repr);
            out.push_str(&format!("    {}: {}\n", entry.name(), repr));
        }
        out
    }
}

impl fmt::Display for Config {
    /// JSON object of entry names to display strings, sorted, indented by
    /// two spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self.to_string_map()).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}
