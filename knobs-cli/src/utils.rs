//! Utility functions for CLI operations.
//!
//! This module provides the layering options shared by the commands that
//! read a configuration file, and the helper that assembles them.

use crate::error::CliError;
use clap::Args;
use knobs::{Configurations, ConfigurationsBuilder, EnvironmentOverlay};
use std::path::Path;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,
}

/// Layers applied on top of a loaded configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct LayerArgs {
    /// Overlay `PREFIX_*` environment variables (`PREFIX_A__B` sets `a.b`)
    #[arg(long, value_name = "PREFIX", env = "KNOBS_ENV_PREFIX")]
    pub env_prefix: Option<String>,

    /// Override a key (repeatable, highest precedence)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, String)>,
}

/// Parses a `KEY=VALUE` override.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Loads `file` and applies the environment overlay and overrides.
pub fn load_configurations(file: &Path, layers: &LayerArgs) -> Result<Configurations, CliError> {
    let mut builder = ConfigurationsBuilder::new().load(file)?;

    if let Some(prefix) = &layers.env_prefix {
        builder = builder.environment(EnvironmentOverlay::new(prefix));
    }

    let configurations = builder.put_all(layers.overrides.iter().cloned()).build();
    log::info!(
        "Loaded {} configuration key(s) from {}",
        configurations.len(),
        file.display()
    );
    Ok(configurations)
}
