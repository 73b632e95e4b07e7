//! Main entry point for the configence CLI.
//!
//! - `resolve`: Load a schema file and print the resolved configuration
//! - `validate`: Check a schema file
//! - `completions`: Generate shell completion scripts

use clap::Parser;
use configence_cli::cli::{Cli, Command};
use configence_cli::error::CliError;
use configence_cli::utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    configence::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Command::Resolve(cmd) => cmd.execute(&global),
        Command::Validate(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(CliError::HelpRequested(help)) => {
            print!("{help}");
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
