//! Duration command implementation.
//!
//! Normalizes a duration literal to its ISO-8601 form.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, ValueEnum};
use knobs::duration;
use serde::Serialize;

/// Parse a duration literal and print its ISO-8601 form.
#[derive(Args, Debug)]
pub struct DurationCommand {
    /// Duration literal, e.g. "PT1H30M" or "1 hour 30 minutes"
    #[arg(value_name = "LITERAL", allow_hyphen_values = true)]
    pub literal: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: DurationFormat,
}

/// Output format for the duration command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DurationFormat {
    /// The ISO-8601 form only
    Text,
    /// A JSON object with the ISO form and total seconds
    Json,
}

/// JSON output of the duration command.
#[derive(Debug, Serialize)]
struct DurationOutput<'a> {
    literal: &'a str,
    iso: String,
    seconds: i64,
    nanos: i32,
}

impl DurationCommand {
    /// Execute the duration command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let parsed = duration::parse(&self.literal)?;
        let iso = duration::format_iso(parsed);

        match self.format {
            DurationFormat::Text => println!("{iso}"),
            DurationFormat::Json => {
                let output = DurationOutput {
                    literal: &self.literal,
                    iso,
                    seconds: parsed.num_seconds(),
                    nanos: parsed.subsec_nanos(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }
}
