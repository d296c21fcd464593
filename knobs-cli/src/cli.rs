//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, DumpCommand, DurationCommand, GetCommand, KeysCommand};
use clap::{Parser, Subcommand};

/// Command-line tool for inspecting configuration files.
#[derive(Parser, Debug)]
#[command(name = "knobs")]
#[command(version, about = "Inspect configuration files", long_about = None)]
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
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value of a key
    Get(GetCommand),

    /// Print every entry of a configuration file
    Dump(DumpCommand),

    /// List the keys of a configuration file
    Keys(KeysCommand),

    /// Normalize a duration literal to ISO-8601
    Duration(DurationCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_get_with_overrides() {
        let cli = Cli::try_parse_from([
            "knobs",
            "--verbose",
            "get",
            "app.json",
            "server.port",
            "--set",
            "server.port=9090",
            "--default",
            "80",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Get(get) => {
                assert_eq!(get.key, "server.port");
                assert_eq!(get.default.as_deref(), Some("80"));
                assert_eq!(
                    get.layers.overrides,
                    vec![("server.port".to_string(), "9090".to_string())]
                );
            }
            _ => panic!("expected get"),
        }
    }

    #[test]
    fn test_duration_accepts_negative_literal() {
        let cli = Cli::try_parse_from(["knobs", "duration", "-PT5M"]).unwrap();
        assert!(matches!(cli.command, Command::Duration(d) if d.literal == "-PT5M"));
    }

    #[test]
    fn test_rejects_malformed_override() {
        assert!(Cli::try_parse_from(["knobs", "keys", "app.json", "--set", "novalue"]).is_err());
    }
}
