//! `.env` file source.
//!
//! Supports the common subset of the dotenv format:
//!
//! - `KEY=VALUE` lines, split on the first `=`
//! - blank lines and lines starting with `#` are ignored
//! - an optional leading `export ` is stripped from the key
//! - values wrapped in matching single or double quotes are unquoted
//!
//! Lines without `=` are skipped. Later assignments replace earlier ones.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::ValueSource;
use crate::error::Result;

/// File name searched for by [`DotenvSource::discover`].
pub const DOTENV_FILE_NAME: &str = ".env";

/// Values parsed from a `.env` file.
///
/// # Examples
///
/// ```
/// use configence::source::{DotenvSource, ValueSource};
///
/// let source = DotenvSource::parse(
///     "# heroes\nexport MY_HERO='Son Goku'\nPOWER_LEVEL = 9001\n",
/// );
/// assert_eq!(source.get("MY_HERO").as_deref(), Some("Son Goku"));
/// assert_eq!(source.get("POWER_LEVEL").as_deref(), Some("9001"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DotenvSource {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl DotenvSource {
    /// Parse dotenv-formatted text.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        let values = contents.lines().filter_map(Self::parse_line).collect();
        Self { path: None, values }
    }

    /// Load and parse a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        log::debug!("Loaded dotenv file {}", path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            ..Self::parse(&contents)
        })
    }

    /// Find the nearest `.env` file by walking up from `start_dir`.
    ///
    /// Returns `Ok(None)` if no ancestor contains one.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read.
    pub fn discover(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = Some(start_dir);
        while let Some(dir) = current {
            let candidate = dir.join(DOTENV_FILE_NAME);
            if candidate.is_file() {
                return Self::from_path(&candidate).map(Some);
            }
            current = dir.parent();
        }
        Ok(None)
    }

    /// The file this source was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of parsed assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no assignments were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        let key = key.strip_prefix("export ").map_or(key, str::trim);
        if key.is_empty() {
            return None;
        }

        Some((key.to_string(), Self::unquote(value.trim()).to_string()))
    }

    fn unquote(value: &str) -> &str {
        let bytes = value.as_bytes();
        if bytes.len() >= 2 {
            let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
            if first == last && (first == b'\'' || first == b'"') {
                return &value[1..value.len() - 1];
            }
        }
        value
    }
}

impl ValueSource for DotenvSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => DOTENV_FILE_NAME.to_string(),
        }
    }
}
