//! Utility functions for CLI operations.
//!
//! This module provides the helpers shared by commands: global options,
//! building the value source chain, and choosing an output format.

use std::env;
use std::path::{Path, PathBuf};

use configence::output::{OutputFormat, ShellType};
use configence::source::{ChainedSource, DotenvSource, EnvSource, ValueSource};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,
}

/// Build the source chain: the process environment first, then a dotenv
/// file. An explicit `env_file` must exist; otherwise the nearest `.env`
/// above `start_dir` is used when `discover` is set.
pub fn build_source(
    env_file: Option<&Path>,
    discover: bool,
    start_dir: &Path,
) -> Result<ChainedSource, CliError> {
    let mut chain = ChainedSource::new().with(EnvSource);

    let dotenv = match env_file {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::InvalidArguments(format!(
                    "env file not found: {}",
                    path.display()
                )));
            }
            Some(DotenvSource::from_path(path)?)
        }
        None if discover => DotenvSource::discover(start_dir)?,
        None => None,
    };

    if let Some(dotenv) = dotenv {
        log::debug!("Using {}", dotenv.describe());
        chain.push(Box::new(dotenv));
    }
    Ok(chain)
}

/// The current directory.
pub fn current_dir() -> Result<PathBuf, CliError> {
    Ok(env::current_dir()?)
}

/// Pick the output format. `shell` only matters for exports and falls
/// back to detection.
pub fn output_format(format: FormatArg, shell: Option<&str>) -> Result<OutputFormat, CliError> {
    Ok(match format {
        FormatArg::Json => OutputFormat::Json,
        FormatArg::Debug => OutputFormat::Debug,
        FormatArg::Dotenv => OutputFormat::Dotenv,
        FormatArg::Export => {
            let shell = match shell {
                Some(name) => ShellType::from_string(name)?,
                None => ShellType::detect(),
            };
            OutputFormat::Export(shell)
        }
    })
}

/// Output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    /// Entry names mapped to typed JSON values
    Json,
    /// One `NAME: repr` line per entry
    Debug,
    /// `KEY=value` lines
    Dotenv,
    /// Shell export statements
    Export,
}
