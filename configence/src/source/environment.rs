//! Process environment source.

use std::env;

use super::ValueSource;

/// Reads values from the process environment.
///
/// Variables that are not valid Unicode are treated as absent.
///
/// # Examples
///
/// ```no_run
/// use configence::source::{EnvSource, ValueSource};
///
/// let source = EnvSource;
/// if let Some(home) = source.get("HOME") {
///     println!("HOME is {home}");
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ValueSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn describe(&self) -> String {
        "environment".to_string()
    }
}
