//! Library exports for knobs-cli.
//!
//! This module exports the CLI structure so that documentation tooling and
//! tests can inspect the command definitions.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
pub use error::CliError;
