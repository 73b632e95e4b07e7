//! Library exports for configence-cli.
//!
//! The [`CliAdapter`] exposes configuration entries as command-line
//! options. The CLI structure is exported for the binary and for man page
//! generation.

pub mod adapter;
pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use adapter::{AppliedOverride, CliAdapter};
pub use cli::Cli;
pub use error::CliError;
