//! Schema declaration (the "describe" API).
//!
//! A [`Schema`] is an ordered list of members: entries and top-level
//! delayed values. Every declaration call appends a member, so declaration
//! order is call order and each member's index is its position.
//!
//! ```
//! use configence::delayed::Delayed;
//! use configence::source::MapSource;
//! use configence::Schema;
//!
//! let mut schema = Schema::new("HeroConfig");
//! schema.str("MY_HERO").default("Son Goku");
//! schema.int("POWER_LEVEL").default(9001);
//! schema.delay("SHOUT", Delayed::template("{MY_HERO} is over {POWER_LEVEL}"));
//!
//! let config = schema.load(&MapSource::new()).unwrap();
//! assert_eq!(config.get::<String>("SHOUT").unwrap(), "Son Goku is over 9001");
//! ```

pub mod file;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cast::{Cast, ListCast};
use crate::delayed::Delayed;
use crate::entry::{Entry, EntryDefault};
use crate::error::{Error, Result};
use crate::holder::{engine, Config};
use crate::source::ValueSource;
use crate::value::ValueType;

/// Hook run after all values are resolved. Values it assigns with
/// [`Config::derive`] are attributes, not entries.
pub type LoadHook = dyn Fn(&mut Config) -> Result<()> + Send + Sync;

/// A declared member of a schema.
#[derive(Debug, Clone)]
pub(crate) enum Member {
    Entry(Entry),
    Delayed {
        name: String,
        index: usize,
        delayed: Delayed,
    },
}

impl Member {
    pub(crate) fn name(&self) -> &str {
        match self {
            Self::Entry(entry) => entry.name(),
            Self::Delayed { name, .. } => name.as_str(),
        }
    }

    fn has_delayed_default(&self) -> bool {
        matches!(self, Self::Entry(entry) if entry.default().is_delayed())
    }

    fn references(&self) -> Vec<&str> {
        match self {
            Self::Entry(entry) => match entry.default() {
                EntryDefault::Delayed(delayed) => delayed.references(),
                _ => Vec::new(),
            },
            Self::Delayed { delayed, .. } => delayed.references(),
        }
    }
}

/// A reference from a delayed value to a name that will not be resolved
/// when the value is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// The member holding the delayed value.
    pub member: String,
    /// The referenced name.
    pub reference: String,
    /// True if the name is declared, but resolved after the member.
    pub declared_later: bool,
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.declared_later {
            write!(
                f,
                "{} references {}, which is resolved after it",
                self.member, self.reference
            )
        } else {
            write!(
                f,
                "{} references {}, which is not declared",
                self.member, self.reference
            )
        }
    }
}

/// Handle to a freshly declared entry, for setting its options.
pub struct EntryHandle<'a> {
    entry: &'a mut Entry,
}

impl EntryHandle<'_> {
    /// Look the entry up under `key` instead of its name.
    pub fn key(self, key: impl Into<String>) -> Self {
        self.entry.key = key.into();
        self
    }

    /// Set the default.
    pub fn default(self, default: impl Into<EntryDefault>) -> Self {
        self.entry.default = default.into();
        self
    }

    /// Use a delayed value as the default.
    pub fn delayed_default(self, delayed: impl Into<Delayed>) -> Self {
        self.entry.default = EntryDefault::Delayed(delayed.into());
        self
    }

    /// Set the description.
    pub fn description(self, description: impl Into<String>) -> Self {
        self.entry.description = Some(description.into());
        self
    }

    /// Add a command-line spelling.
    pub fn flag(self, flag: impl Into<String>) -> Self {
        self.entry.flags.push(flag.into());
        self
    }

    /// Override the declared type.
    pub fn value_type(self, value_type: ValueType) -> Self {
        self.entry.value_type = value_type;
        self
    }
}

/// An ordered set of entry declarations.
#[derive(Clone)]
pub struct Schema {
    name: String,
    prefix: Option<String>,
    members: Vec<Member>,
    on_load: Option<Arc<LoadHook>>,
}

impl Schema {
    /// Create an empty schema. `name` appears in the debug form of
    /// loaded configs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            members: Vec::new(),
            on_load: None,
        }
    }

    /// Set the key prefix used by [`Schema::load`].
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.set_prefix(prefix);
        self
    }

    /// Set the key prefix used by [`Schema::load`]. Empty means none.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
    }

    /// Schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Declare an entry. Its index is assigned here.
    pub fn entry(&mut self, mut entry: Entry) -> EntryHandle<'_> {
        entry.index = self.members.len();
        self.members.push(Member::Entry(entry));
        match self.members.last_mut() {
            Some(Member::Entry(entry)) => EntryHandle { entry },
            _ => unreachable!("an entry was just pushed"),
        }
    }

    /// Declare a string entry.
    pub fn str(&mut self, name: &str) -> EntryHandle<'_> {
        self.entry(Entry::new(name, Cast::string()))
    }

    /// Declare an integer entry.
    pub fn int(&mut self, name: &str) -> EntryHandle<'_> {
        self.entry(Entry::new(name, Cast::integer()))
    }

    /// Declare a boolean entry.
    pub fn bool(&mut self, name: &str) -> EntryHandle<'_> {
        self.entry(Entry::new(name, Cast::boolean()))
    }

    /// Declare a float entry.
    pub fn float(&mut self, name: &str) -> EntryHandle<'_> {
        self.entry(Entry::new(name, Cast::float()))
    }

    /// Declare a comma-separated list of strings.
    pub fn list(&mut self, name: &str) -> EntryHandle<'_> {
        self.list_with(name, ListCast::new())
    }

    /// Declare a list with custom splitting rules.
    pub fn list_with(&mut self, name: &str, list: ListCast) -> EntryHandle<'_> {
        self.entry(Entry::new(name, Cast::list(list)))
    }

    /// Declare a structured model entry, parsed from JSON.
    pub fn model<T>(&mut self, name: &str) -> EntryHandle<'_>
    where
        T: DeserializeOwned + Serialize + 'static,
    {
        self.entry(Entry::new(name, Cast::model::<T>()))
    }

    /// Declare an enumeration entry.
    pub fn enumeration<T>(&mut self, name: &str) -> EntryHandle<'_>
    where
        T: DeserializeOwned + Serialize + 'static,
    {
        let cast = Cast::enumeration::<T>();
        self.entry(Entry::new(name, cast.clone()).with_cast_from_json(cast))
    }

    /// Declare an entry restricted to a fixed set of strings.
    pub fn choice<I, S>(&mut self, name: &str, choices: I) -> EntryHandle<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry(Entry::new(name, Cast::choice(choices)))
    }

    /// Declare an untyped JSON entry.
    pub fn json(&mut self, name: &str) -> EntryHandle<'_> {
        self.entry(Entry::new(name, Cast::json()))
    }

    /// Declare a top-level delayed value.
    ///
    /// It is evaluated when the load reaches it, against the members
    /// declared before it, and becomes a string-cast entry keyed by its
    /// name (so a source can still override it).
    pub fn delay(&mut self, name: &str, delayed: impl Into<Delayed>) {
        let index = self.members.len();
        self.members.push(Member::Delayed {
            name: name.to_string(),
            index,
            delayed: delayed.into(),
        });
    }

    /// Set the hook run after all values are resolved.
    pub fn on_load<F>(&mut self, hook: F)
    where
        F: Fn(&mut Config) -> Result<()> + Send + Sync + 'static,
    {
        self.on_load = Some(Arc::new(hook));
    }

    /// Number of declared members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(Member::name)
    }

    /// Declared entries (top-level delayed values excluded).
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.members.iter().filter_map(|member| match member {
            Member::Entry(entry) => Some(entry),
            Member::Delayed { .. } => None,
        })
    }

    pub(crate) fn members(&self) -> &[Member] {
        &self.members
    }

    pub(crate) fn load_hook(&self) -> Option<&LoadHook> {
        self.on_load.as_deref()
    }

    /// Check that member names are unique.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEntry`] for the first repeated name.
    pub fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in self.names() {
            if !seen.insert(name) {
                return Err(Error::DuplicateEntry {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// References in delayed values that will not be resolved when the
    /// value is evaluated. These are not errors: templates keep the
    /// placeholder text.
    ///
    /// Top-level delayed values see the members before them, except
    /// entries with delayed defaults. Delayed defaults see every other
    /// member plus the delayed defaults before them. Source overrides are
    /// not taken into account.
    #[must_use]
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        let all: HashSet<&str> = self.names().collect();
        let settled: HashSet<&str> = self
            .members
            .iter()
            .filter(|member| !member.has_delayed_default())
            .map(Member::name)
            .collect();
        let mut earlier: HashSet<&str> = HashSet::new();
        let mut earlier_deferred: HashSet<&str> = HashSet::new();
        let mut found = Vec::new();

        for member in &self.members {
            let deferred = member.has_delayed_default();
            for reference in member.references() {
                let visible = if deferred {
                    settled.contains(reference) || earlier_deferred.contains(reference)
                } else {
                    earlier.contains(reference)
                };
                if !visible {
                    found.push(UnresolvedReference {
                        member: member.name().to_string(),
                        reference: reference.to_string(),
                        declared_later: all.contains(reference),
                    });
                }
            }
            if deferred {
                earlier_deferred.insert(member.name());
            } else {
                earlier.insert(member.name());
            }
        }
        found
    }

    /// Resolve every member against `source` using the schema prefix.
    ///
    /// # Errors
    ///
    /// Returns the first error met; no partial config is returned.
    pub fn load(&self, source: &dyn ValueSource) -> Result<Config> {
        engine::load(self, source, self.prefix())
    }

    /// Resolve every member with an explicit prefix, replacing the schema
    /// prefix. An empty prefix means none.
    ///
    /// # Errors
    ///
    /// Returns the first error met; no partial config is returned.
    pub fn load_with_prefix(&self, source: &dyn ValueSource, prefix: &str) -> Result<Config> {
        engine::load(self, source, Some(prefix))
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .field("members", &self.members)
            .field("on_load", &self.on_load.is_some())
            .finish()
    }
}
