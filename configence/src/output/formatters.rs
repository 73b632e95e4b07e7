//! Output formatter implementations.

use serde_json::Map;

use crate::{Config, Entry, Error, Result, Value};

use super::{OutputFormatter, ShellType};

/// Validates that a string is a valid environment variable name.
///
/// Valid names must:
/// - Start with a letter or underscore
/// - Contain only letters, digits, and underscores
pub(crate) fn is_valid_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Resolved entries as `(effective key, display value)` pairs, sorted by key.
fn env_pairs(config: &Config) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for entry in config.entries() {
        let Some(value) = entry.value() else {
            continue;
        };
        let var_name = effective_key(config, entry);
        if !is_valid_env_var_name(&var_name) {
            return Err(Error::validation(
                entry.name(),
                format!(
                    "invalid environment variable name '{var_name}': must contain only alphanumeric characters and underscores, and start with a letter or underscore"
                ),
            ));
        }
        pairs.push((var_name, env_text(entry.name(), value)?));
    }
    pairs.sort();
    Ok(pairs)
}

/// Text form of a value as a list cast would read it back: list elements
/// joined by commas, quoted when they contain a delimiter, a quote, or
/// surrounding whitespace.
///
/// The list cast has no escape sequence, so an element holding both quote
/// characters cannot be written and is rejected.
fn env_text(name: &str, value: &Value) -> Result<String> {
    let Value::List(items) = value else {
        return Ok(value.to_string());
    };
    let mut elements = Vec::with_capacity(items.len());
    for item in items {
        let text = item.to_string();
        let needs_quotes = text.is_empty()
            || text.contains(|c: char| matches!(c, ',' | '"' | '\''))
            || text.trim() != text;
        let element = if !needs_quotes {
            text
        } else if !text.contains('"') {
            format!("\"{text}\"")
        } else if !text.contains('\'') {
            format!("'{text}'")
        } else {
            return Err(Error::validation(
                name,
                format!("list element {text} mixes single and double quotes and cannot be written"),
            ));
        };
        elements.push(element);
    }
    Ok(elements.join(","))
}

fn effective_key(config: &Config, entry: &Entry) -> String {
    format!("{}{}", config.prefix().unwrap_or_default(), entry.key())
}

/// Formatter for shell-specific export statements.
pub struct ExportFormatter {
    shell: ShellType,
}

impl ExportFormatter {
    /// Create a new export formatter for `shell`.
    #[must_use]
    pub fn new(shell: ShellType) -> Self {
        Self { shell }
    }
}

impl OutputFormatter for ExportFormatter {
    fn format(&self, config: &Config) -> Result<String> {
        Ok(env_pairs(config)?
            .iter()
            .map(|(var, value)| self.shell.format_export(var, value))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Formatter for JSON output: entry names mapped to typed values.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, config: &Config) -> Result<String> {
        let mut object = Map::new();
        for entry in config.entries() {
            if let Some(value) = entry.value() {
                object.insert(entry.name().to_string(), value.to_json());
            }
        }
        Ok(serde_json::to_string_pretty(&object)?)
    }
}

/// Formatter for dotenv (.env file) format.
///
/// Values that need it are quoted so that
/// [`DotenvSource`](crate::source::DotenvSource) reads them back unchanged.
pub struct DotenvFormatter;

impl DotenvFormatter {
    fn quote(value: &str) -> String {
        let plain = !value.is_empty()
            && value
                .chars()
                .all(|c| !c.is_whitespace() && !matches!(c, '#' | '"' | '\'' | '\\'));
        if plain {
            value.to_string()
        } else if value.contains('\'') {
            format!("\"{value}\"")
        } else {
            format!("'{value}'")
        }
    }
}

impl OutputFormatter for DotenvFormatter {
    fn format(&self, config: &Config) -> Result<String> {
        Ok(env_pairs(config)?
            .iter()
            .map(|(var, value)| format!("{var}={}", Self::quote(value)))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Formatter for the debug listing.
pub struct DebugFormatter;

impl OutputFormatter for DebugFormatter {
    fn format(&self, config: &Config) -> Result<String> {
        Ok(config.debug_repr().trim_end().to_string())
    }
}
