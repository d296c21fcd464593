//! Main entry point for the knobs CLI.
//!
//! This is the command-line interface for the knobs configuration library.
//! It provides commands for inspecting configuration files:
//! - `get`: Print the value of a key
//! - `dump`: Print every entry
//! - `keys`: List keys
//! - `duration`: Normalize a duration literal

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use error::CliError;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments; help and version requests also arrive as errors
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                CliError::from(e).exit_code()
            } else {
                0
            };
            std::process::exit(code);
        }
    };

    // Initialize logging based on verbosity
    let level = knobs::init_logger(cli.verbose, cli.quiet);
    log::debug!("Log level set to {level}");

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Dump(cmd) => cmd.execute(&global),
        cli::Command::Keys(cmd) => cmd.execute(&global),
        cli::Command::Duration(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
