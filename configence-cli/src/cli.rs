//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, ResolveCommand, ValidateCommand};
use clap::{Parser, Subcommand};

/// Load configuration schemas and print the resolved values.
#[derive(Parser)]
#[command(name = "configence")]
#[command(
    version,
    about = "Resolve declarative configuration schemas",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve a schema and print the configuration
    Resolve(ResolveCommand),

    /// Check a schema file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
