//! Get command implementation.
//!
//! Prints one value from a configuration file, optionally interpreted as a
//! duration.

use crate::error::CliError;
use crate::utils::{load_configurations, GlobalOptions, LayerArgs};
use clap::Args;
use knobs::duration;
use std::path::PathBuf;

/// Print the value of a key.
#[derive(Args, Debug)]
pub struct GetCommand {
    /// Configuration file (.json, .js, .yaml, .yml or .properties)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Dotted key to look up
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Value printed when the key is absent
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,

    /// Interpret the value as a duration and print it in ISO-8601 form
    #[arg(long)]
    pub duration: bool,

    #[command(flatten)]
    pub layers: LayerArgs,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let configurations = load_configurations(&self.file, &self.layers)?;

        let value = if self.duration {
            let parsed = match &self.default {
                Some(default) if !configurations.contains_key(&self.key) => {
                    duration::parse(default)?
                }
                _ => configurations.get_duration(&self.key)?,
            };
            duration::format_iso(parsed)
        } else {
            match (configurations.get(&self.key), &self.default) {
                (Some(value), _) => value.to_string(),
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    return Err(knobs::Error::MissingKey {
                        key: self.key.clone(),
                    }
                    .into());
                }
            }
        };

        println!("{value}");
        Ok(())
    }
}
