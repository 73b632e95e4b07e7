//! Output formatting for loaded configurations.
//!
//! A [`Config`] can be rendered as JSON, as its debug form, as a dotenv
//! file, or as shell-specific export statements. The dotenv and export
//! forms are keyed by the effective key (prefix plus entry key), so their
//! output can be fed back in as a source.

mod formatters;
mod shell;

use crate::{Config, Result};

pub use formatters::{DebugFormatter, DotenvFormatter, ExportFormatter, JsonFormatter};
pub use shell::ShellType;

/// Trait for rendering a loaded configuration.
pub trait OutputFormatter {
    /// Format `config` into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatting fails (e.g., an effective key is
    /// not a valid environment variable name).
    fn format(&self, config: &Config) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Entry names mapped to typed JSON values.
    Json,
    /// The `NAME: repr` debug listing.
    Debug,
    /// Dotenv (.env file) format.
    Dotenv,
    /// Shell-specific export statements.
    Export(ShellType),
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Json => Box::new(JsonFormatter),
            Self::Debug => Box::new(DebugFormatter),
            Self::Dotenv => Box::new(DotenvFormatter),
            Self::Export(shell) => Box::new(ExportFormatter::new(*shell)),
        }
    }
}
