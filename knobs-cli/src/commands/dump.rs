//! Dump command implementation.
//!
//! Prints every flattened entry of a configuration file.

use crate::error::CliError;
use crate::utils::{load_configurations, GlobalOptions, LayerArgs};
use clap::{Args, ValueEnum};
use knobs::Configurations;
use std::io::{self, Write};
use std::path::PathBuf;

/// Print every entry of a configuration file.
#[derive(Args, Debug)]
pub struct DumpCommand {
    /// Configuration file (.json, .js, .yaml, .yml or .properties)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "text",
        env = "KNOBS_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: DumpFormat,

    /// Only dump keys under this prefix
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    #[command(flatten)]
    pub layers: LayerArgs,
}

/// Output format for the dump command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DumpFormat {
    /// One `key=value` line per entry
    Text,
    /// A flat JSON object
    Json,
}

impl DumpCommand {
    /// Execute the dump command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let mut configurations = load_configurations(&self.file, &self.layers)?;
        if let Some(prefix) = &self.prefix {
            configurations = configurations.extract(prefix);
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_entries(&mut out, &configurations, self.format)?;
        out.flush()?;
        Ok(())
    }
}

/// Writes `configurations` to `out` in the given format.
pub fn write_entries(
    out: &mut impl Write,
    configurations: &Configurations,
    format: DumpFormat,
) -> Result<(), CliError> {
    match format {
        DumpFormat::Text => {
            for (key, value) in configurations.iter() {
                writeln!(out, "{key}={value}")?;
            }
        }
        DumpFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, configurations)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
