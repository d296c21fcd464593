//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `get`: Print the value of a key
//! - `dump`: Print every entry of a configuration file
//! - `keys`: List the keys of a configuration file
//! - `duration`: Normalize a duration literal
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod dump;
pub mod duration;
pub mod get;
pub mod keys;

pub use completions::CompletionsCommand;
pub use dump::DumpCommand;
pub use duration::DurationCommand;
pub use get::GetCommand;
pub use keys::KeysCommand;
