//! Entry descriptors.
//!
//! An [`Entry`] describes one configuration value: where it is looked up,
//! how the raw string is cast, what the default is, and how it should be
//! exposed on a command line. Entries are created by a
//! [`Schema`](crate::schema::Schema) and owned by the resulting
//! [`Config`](crate::holder::Config).

use crate::cast::Cast;
use crate::delayed::Delayed;
use crate::value::{Value, ValueType};

/// The default of an entry.
#[derive(Debug, Clone, Default)]
pub enum EntryDefault {
    /// No default: a missing key is an error.
    #[default]
    Undefined,
    /// A literal default. Strings are cast like raw values.
    Value(Value),
    /// A default computed after plain entries resolve.
    Delayed(Delayed),
}

impl EntryDefault {
    /// Returns true for [`EntryDefault::Delayed`].
    #[must_use]
    pub const fn is_delayed(&self) -> bool {
        matches!(self, Self::Delayed(_))
    }

    /// Returns true for [`EntryDefault::Undefined`].
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl From<Delayed> for EntryDefault {
    fn from(delayed: Delayed) -> Self {
        Self::Delayed(delayed)
    }
}

macro_rules! literal_default {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for EntryDefault {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

literal_default!(Value, &str, String, bool, i32, i64, f64, serde_json::Value);

/// What a command-line adapter needs to expose an entry as an option.
#[derive(Debug, Clone, PartialEq)]
pub struct CliOptionKwargs {
    /// Help text (the entry description, or empty).
    pub help: String,
    /// The current value, rendered for display. `None` while unresolved.
    pub default: Option<String>,
    /// Explicit option spellings (for example `--hero` or `-H`).
    pub flags: Vec<String>,
    /// The declared type.
    pub value_type: ValueType,
}

/// A named, typed configuration descriptor.
#[derive(Debug, Clone)]
pub struct Entry {
    pub(crate) name: String,
    pub(crate) key: String,
    pub(crate) default: EntryDefault,
    pub(crate) description: Option<String>,
    pub(crate) cast: Cast,
    pub(crate) cast_from_json: Option<Cast>,
    pub(crate) value_type: ValueType,
    pub(crate) flags: Vec<String>,
    pub(crate) index: usize,
    pub(crate) value: Option<Value>,
}

impl Entry {
    /// Create an entry whose key equals its name.
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::{Cast, Entry, ValueType};
    ///
    /// let entry = Entry::new("POWER_LEVEL", Cast::integer()).with_default(9001);
    /// assert_eq!(entry.key(), "POWER_LEVEL");
    /// assert_eq!(entry.value_type(), ValueType::Int);
    /// assert!(entry.value().is_none());
    /// ```
    pub fn new(name: impl Into<String>, cast: Cast) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            default: EntryDefault::Undefined,
            description: None,
            value_type: cast.value_type(),
            cast_from_json: cast.is_structured().then(|| cast.clone()),
            cast,
            flags: Vec::new(),
            index: 0,
            value: None,
        }
    }

    /// Set the lookup key (before prefixing).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the default.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<EntryDefault>) -> Self {
        self.default = default.into();
        self
    }

    /// Set the description used as help text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a command-line spelling.
    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Override the declared type.
    #[must_use]
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Set the cast applied to structured (JSON object) defaults.
    #[must_use]
    pub fn with_cast_from_json(mut self, cast: Cast) -> Self {
        self.cast_from_json = Some(cast);
        self
    }

    /// Attribute name on the holder.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lookup key, before prefixing.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The declared default.
    #[must_use]
    pub const fn default(&self) -> &EntryDefault {
        &self.default
    }

    /// The description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Cast applied to raw values and string defaults.
    #[must_use]
    pub const fn cast(&self) -> &Cast {
        &self.cast
    }

    /// Cast applied to structured defaults.
    #[must_use]
    pub const fn cast_from_json(&self) -> Option<&Cast> {
        self.cast_from_json.as_ref()
    }

    /// Declared type.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Command-line spellings.
    #[must_use]
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Declaration index within the owning schema.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Resolved value. `None` before evaluation and while a delayed
    /// default is pending.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Returns true once the entry holds a value.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    /// Option metadata for a command-line adapter.
    ///
    /// The current value is offered as the option default, so an option
    /// that is not given keeps the resolved value.
    #[must_use]
    pub fn cli_option_kwargs(&self) -> CliOptionKwargs {
        CliOptionKwargs {
            help: self.description.clone().unwrap_or_default(),
            default: self.value.as_ref().map(ToString::to_string),
            flags: self.flags.clone(),
            value_type: self.cli_type(),
        }
    }

    /// The type a command-line adapter should parse into.
    #[must_use]
    pub const fn cli_type(&self) -> ValueType {
        self.value_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::ListCast;

    #[test]
    fn test_new_entry_defaults() {
        let entry = Entry::new("MY_HERO", Cast::string());
        assert_eq!(entry.name(), "MY_HERO");
        assert_eq!(entry.key(), "MY_HERO");
        assert!(entry.default().is_undefined());
        assert_eq!(entry.description(), None);
        assert!(entry.flags().is_empty());
        assert!(!entry.is_resolved());
        assert!(entry.cast_from_json().is_none());
    }

    #[test]
    fn test_builder_methods() {
        let entry = Entry::new("HERO", Cast::string())
            .with_key("MY_HERO")
            .with_default("Son Goku")
            .with_description("The main character")
            .with_flag("--hero")
            .with_flag("-H");
        assert_eq!(entry.key(), "MY_HERO");
        assert!(matches!(entry.default(), EntryDefault::Value(Value::Str(s)) if s == "Son Goku"));
        assert_eq!(entry.description(), Some("The main character"));
        assert_eq!(entry.flags(), ["--hero", "-H"]);
    }

    #[test]
    fn test_delayed_default() {
        let entry = Entry::new("MESSAGE", Cast::string())
            .with_default(Delayed::template("{MY_HERO}"));
        assert!(entry.default().is_delayed());
    }

    #[test]
    fn test_structured_cast_sets_cast_from_json() {
        let entry = Entry::new("DOC", Cast::json());
        assert!(entry.cast_from_json().is_some());
        assert_eq!(entry.value_type(), ValueType::Json);
    }

    #[test]
    fn test_value_type_follows_cast() {
        let entry = Entry::new("EVENTS", Cast::list(ListCast::new()));
        assert_eq!(entry.value_type(), ValueType::List);
        assert_eq!(entry.cli_type(), ValueType::List);
    }

    #[test]
    fn test_cli_option_kwargs() {
        let mut entry = Entry::new("POWER_LEVEL", Cast::integer())
            .with_description("Power level")
            .with_flag("--power");
        assert_eq!(entry.cli_option_kwargs().default, None);

        entry.value = Some(Value::Int(9001));
        let kwargs = entry.cli_option_kwargs();
        assert_eq!(kwargs.help, "Power level");
        assert_eq!(kwargs.default.as_deref(), Some("9001"));
        assert_eq!(kwargs.flags, vec!["--power".to_string()]);
        assert_eq!(kwargs.value_type, ValueType::Int);
    }

    #[test]
    fn test_cli_option_kwargs_without_description() {
        let entry = Entry::new("X", Cast::string());
        assert_eq!(entry.cli_option_kwargs().help, "");
    }
}
