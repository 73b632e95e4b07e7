//! CLI command implementations.
//!
//! - `resolve`: Load a schema file and print the resolved configuration
//! - `validate`: Check a schema file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod resolve;
pub mod validate;

pub use completions::CompletionsCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
