//! Command to validate a schema file.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use configence::SchemaFile;
use std::path::PathBuf;

/// Validate a schema file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Schema file to validate
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

impl ValidateCommand {
    /// Execute the validate command.
    ///
    /// Placeholders that will stay literal are reported as warnings; they
    /// do not fail validation.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.schema.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.schema.display()
            )));
        }

        let file = SchemaFile::from_path(&self.schema)?;
        let schema = file.to_schema()?;

        if !global.quiet {
            for unresolved in schema.unresolved_references() {
                eprintln!("Warning: {unresolved}");
            }
        }

        println!(
            "Schema {} is valid ({} members)",
            schema.name(),
            schema.len()
        );
        Ok(())
    }
}
