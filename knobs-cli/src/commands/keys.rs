//! Keys command implementation.

use crate::error::CliError;
use crate::utils::{load_configurations, GlobalOptions, LayerArgs};
use clap::Args;
use std::path::PathBuf;

/// List the keys of a configuration file.
#[derive(Args, Debug)]
pub struct KeysCommand {
    /// Configuration file (.json, .js, .yaml, .yml or .properties)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only list keys equal to or under this prefix
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    #[command(flatten)]
    pub layers: LayerArgs,
}

impl KeysCommand {
    /// Execute the keys command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let configurations = load_configurations(&self.file, &self.layers)?;

        for key in configurations
            .keys()
            .filter(|key| matches_prefix(key, self.prefix.as_deref()))
        {
            println!("{key}");
        }
        Ok(())
    }
}

/// Returns `true` if `key` is `prefix` itself or nested under it.
fn matches_prefix(key: &str, prefix: Option<&str>) -> bool {
    match prefix {
        None => true,
        Some(prefix) => key
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.')),
    }
}
