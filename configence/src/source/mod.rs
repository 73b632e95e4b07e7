//! Key/value sources that entries are resolved from.
//!
//! A source only answers "what is the raw string for this key?". Defaults,
//! prefixing and casting are layered on top by the
//! [`Resolver`](crate::resolver::Resolver).
//!
//! # Precedence
//!
//! [`ChainedSource`] asks its sources in order and returns the first hit.
//! The conventional chain puts the process environment before a `.env`
//! file, so exported variables override file contents:
//!
//! ```
//! use configence::source::{ChainedSource, DotenvSource, MapSource, ValueSource};
//!
//! let env = MapSource::from_pairs([("MY_HERO", "Vegeta")]);
//! let file = DotenvSource::parse("MY_HERO=Son Goku\nPOWER_LEVEL=9001\n");
//!
//! let chain = ChainedSource::new().with(env).with(file);
//! assert_eq!(chain.get("MY_HERO").as_deref(), Some("Vegeta"));
//! assert_eq!(chain.get("POWER_LEVEL").as_deref(), Some("9001"));
//! assert_eq!(chain.get("MISSING"), None);
//! ```

mod dotenv;
mod environment;
mod memory;

pub use dotenv::DotenvSource;
pub use environment::EnvSource;
pub use memory::MapSource;

/// A provider of raw string values.
///
/// Implementations must be read-only from the resolver's point of view.
pub trait ValueSource: Send + Sync {
    /// Return the raw value for `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Short human-readable name used in diagnostics.
    fn describe(&self) -> String {
        "custom source".to_string()
    }
}

impl<S: ValueSource + ?Sized> ValueSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// An ordered list of sources; the first source that knows a key wins.
#[derive(Default)]
pub struct ChainedSource {
    sources: Vec<Box<dyn ValueSource>>,
}

impl ChainedSource {
    /// Create an empty chain (every lookup misses).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source with lower precedence than the ones already added.
    #[must_use]
    pub fn with(mut self, source: impl ValueSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Append a boxed source.
    pub fn push(&mut self, source: Box<dyn ValueSource>) {
        self.sources.push(source);
    }

    /// Number of sources in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if the chain has no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl ValueSource for ChainedSource {
    fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }

    fn describe(&self) -> String {
        let names: Vec<String> = self.sources.iter().map(|s| s.describe()).collect();
        format!("chain({})", names.join(" > "))
    }
}
