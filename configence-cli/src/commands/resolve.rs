//! Command to resolve a schema file and print the configuration.

use std::path::PathBuf;

use clap::Args;
use configence::Schema;

use crate::adapter::CliAdapter;
use crate::error::CliError;
use crate::utils::{build_source, current_dir, output_format, FormatArg, GlobalOptions};

/// Resolve a schema and print the configuration.
///
/// Options after `--` are entry overrides, generated from the schema
/// (`--my-hero Vegeta`, or the entry's own flags). Run with `-- --help`
/// to list them. Each applied override is reported on stderr unless
/// `--quiet` is given.
#[derive(Args)]
pub struct ResolveCommand {
    /// Schema file (YAML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Key prefix, replacing the schema's own
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Dotenv file read after the environment
    #[arg(long, value_name = "PATH", env = "CONFIGENCE_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Do not look for a .env file
    #[arg(long)]
    pub no_dotenv: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: FormatArg,

    /// Shell for export output (defaults to the detected shell)
    #[arg(long, value_name = "SHELL")]
    pub shell: Option<String>,

    /// Entry overrides
    #[arg(last = true, value_name = "OVERRIDES")]
    pub overrides: Vec<String>,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let format = output_format(self.format, self.shell.as_deref())?;
        let schema = Schema::from_file(&self.schema)?;

        let source = build_source(self.env_file.as_deref(), !self.no_dotenv, &current_dir()?)?;
        let mut config = match &self.prefix {
            Some(prefix) => schema.load_with_prefix(&source, prefix)?,
            None => schema.load(&source)?,
        };

        let name = format!("configence resolve {} --", self.schema.display());
        let adapter = CliAdapter::new(name, &[&config])?
            .about(format!("Entry overrides for {}", config.name()));
        let args = std::iter::once("configence".to_string()).chain(self.overrides);
        let matches = adapter.parse_from(args)?;
        for applied in adapter.apply(&matches, &mut [&mut config])? {
            log::debug!("{} overridden with {}", applied.entry, applied.value.repr());
            if !global.quiet {
                eprintln!("Overriding {} with {}", applied.entry, applied.value.repr());
            }
        }

        let output = format.create_formatter().format(&config)?;
        println!("{output}");
        Ok(())
    }
}
