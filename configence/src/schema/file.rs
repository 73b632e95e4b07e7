//! YAML schema files.
//!
//! A schema file declares the same members the builder API does:
//!
//! ```yaml
//! name: HeroConfig
//! prefix: APP_
//! entries:
//!   - name: MY_HERO
//!     default: Son Goku
//!     description: The main character
//!     flags: ["--hero"]
//!   - name: POWER_LEVEL
//!     type: int
//!     default: 9001
//!   - name: EVENTS
//!     type: list
//!     delimiter: ";"
//!     default: [event1, event2]
//!   - name: SHOUT
//!     delay: "{MY_HERO} is over {POWER_LEVEL}"
//! ```
//!
//! Entries default to `type: str`. A member with `delay` is a top-level
//! delayed template and takes no other options besides `name`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::Schema;
use crate::cast::{Cast, ListCast};
use crate::delayed::Delayed;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::value::Value;

/// Schema name used when the file does not set one.
pub const DEFAULT_SCHEMA_NAME: &str = "Configence";

/// Entry type names accepted in schema files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// String.
    #[default]
    Str,
    /// Integer.
    Int,
    /// Boolean.
    Bool,
    /// Float.
    Float,
    /// Delimited list.
    List,
    /// JSON document.
    Json,
    /// One of `choices`.
    Choice,
}

impl EntryKind {
    const fn is_scalar(self) -> bool {
        matches!(self, Self::Str | Self::Int | Self::Bool | Self::Float)
    }

    fn scalar_cast(self) -> Cast {
        match self {
            Self::Int => Cast::integer(),
            Self::Bool => Cast::boolean(),
            Self::Float => Cast::float(),
            _ => Cast::string(),
        }
    }
}

/// One member of a schema file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntrySpec {
    /// Attribute name.
    pub name: String,
    /// Lookup key, if different from the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Entry type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    /// Literal default. An explicit `null` is a null default.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<serde_json::Value>,
    /// Template evaluated as the default once plain entries resolve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_template: Option<String>,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Command-line spellings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    /// List delimiter set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    /// Characters stripped from list elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip: Option<String>,
    /// Scalar type of list elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<EntryKind>,
    /// Accepted values of a choice entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    /// Makes this member a top-level delayed template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
}

// Distinguishes an explicit `default: null` from an absent default.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl EntrySpec {
    fn invalid(&self, message: impl Into<String>) -> Error {
        Error::validation(self.name.clone(), message)
    }

    fn check(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(self.invalid("entry name must not be empty"));
        }

        if self.delay.is_some() {
            let has_entry_options = self.key.is_some()
                || self.kind.is_some()
                || self.default.is_some()
                || self.default_template.is_some()
                || !self.flags.is_empty()
                || self.description.is_some();
            if has_entry_options {
                return Err(self.invalid("a delayed member only takes 'name' and 'delay'"));
            }
            return Ok(());
        }

        let kind = self.kind.unwrap_or_default();
        if self.default.is_some() && self.default_template.is_some() {
            return Err(self.invalid("'default' and 'default_template' are exclusive"));
        }
        if kind != EntryKind::List
            && (self.delimiter.is_some() || self.strip.is_some() || self.item_type.is_some())
        {
            return Err(self.invalid("'delimiter', 'strip' and 'item_type' apply to lists only"));
        }
        if let Some(item) = self.item_type {
            if !item.is_scalar() {
                return Err(self.invalid("'item_type' must be str, int, bool or float"));
            }
        }
        if kind == EntryKind::Choice && self.choices.is_empty() {
            return Err(self.invalid("a choice entry needs 'choices'"));
        }
        if kind != EntryKind::Choice && !self.choices.is_empty() {
            return Err(self.invalid("'choices' applies to choice entries only"));
        }
        Ok(())
    }

    fn cast(&self) -> Cast {
        match self.kind.unwrap_or_default() {
            EntryKind::List => {
                let mut list = ListCast::new();
                if let Some(delimiter) = &self.delimiter {
                    list = list.delimiter(delimiter.clone());
                }
                if let Some(strip) = &self.strip {
                    list = list.strip(strip.clone());
                }
                if let Some(item) = self.item_type {
                    list = list.item(item.scalar_cast());
                }
                Cast::list(list)
            }
            EntryKind::Json => Cast::json(),
            EntryKind::Choice => Cast::choice(self.choices.iter().cloned()),
            scalar => scalar.scalar_cast(),
        }
    }

    fn declare(&self, schema: &mut Schema) {
        if let Some(template) = &self.delay {
            schema.delay(&self.name, Delayed::template(template.clone()));
            return;
        }

        let mut entry = Entry::new(self.name.clone(), self.cast());
        if let Some(key) = &self.key {
            entry = entry.with_key(key.clone());
        }
        if let Some(default) = &self.default {
            entry = entry.with_default(Value::from_json(default.clone()));
        }
        if let Some(template) = &self.default_template {
            entry = entry.with_default(Delayed::template(template.clone()));
        }
        if let Some(description) = &self.description {
            entry = entry.with_description(description.clone());
        }
        for flag in &self.flags {
            entry = entry.with_flag(flag.clone());
        }
        schema.entry(entry);
    }
}

/// A parsed schema file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Schema name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Key prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Members, in declaration order.
    #[serde(default)]
    pub entries: Vec<EntrySpec>,
}

fn default_name() -> String {
    DEFAULT_SCHEMA_NAME.to_string()
}

impl SchemaFile {
    /// Parse YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if the text is not a valid schema file.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Read and parse a schema file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`Error::Schema`] if it cannot be parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        log::debug!("Loaded schema file {}", path.display());
        Self::parse(&contents)
    }

    /// Check member options and names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the offending member, or
    /// [`Error::DuplicateEntry`].
    pub fn check(&self) -> Result<()> {
        for spec in &self.entries {
            spec.check()?;
        }
        self.build().check()
    }

    fn build(&self) -> Schema {
        let mut schema = Schema::new(self.name.clone());
        if let Some(prefix) = &self.prefix {
            schema.set_prefix(prefix.clone());
        }
        for spec in &self.entries {
            spec.declare(&mut schema);
        }
        schema
    }

    /// Build the equivalent [`Schema`].
    ///
    /// # Errors
    ///
    /// See [`SchemaFile::check`].
    pub fn to_schema(&self) -> Result<Schema> {
        self.check()?;
        Ok(self.build())
    }
}

impl Schema {
    /// Load a schema from a YAML file.
    ///
    /// # Errors
    ///
    /// See [`SchemaFile::from_path`] and [`SchemaFile::check`].
    pub fn from_file(path: &Path) -> Result<Self> {
        SchemaFile::from_path(path)?.to_schema()
    }
}
