//! In-memory source for tests, embedding, and programmatic overrides.

use std::collections::HashMap;

use super::ValueSource;

/// A source backed by a `HashMap`.
///
/// # Examples
///
/// ```
/// use configence::source::{MapSource, ValueSource};
///
/// let mut source = MapSource::new();
/// source.set("POWER_LEVEL", "9001");
///
/// assert_eq!(source.get("POWER_LEVEL").as_deref(), Some("9001"));
/// assert_eq!(source.get("MY_HERO"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    /// Create an empty source (every lookup misses).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from key/value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::source::{MapSource, ValueSource};
    ///
    /// let source = MapSource::from_pairs([("MY_HERO", "Vegeta")]);
    /// assert_eq!(source.get("MY_HERO").as_deref(), Some("Vegeta"));
    /// ```
    #[must_use]
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// All stored values.
    #[must_use]
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }
}

impl ValueSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn describe(&self) -> String {
        format!("memory({} keys)", self.values.len())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
