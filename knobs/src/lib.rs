#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # knobs
//!
//! A library for reading application configurations.
//!
//! Nested documents (JSON, YAML, properties) are flattened into immutable
//! dotted-key mappings with typed accessors for strings, durations,
//! integers, booleans and secrets.
//!
//! ## Core Types
//!
//! - [`Configurations`] and [`ConfigurationsBuilder`]: the mapping and its
//!   layered construction
//! - [`Password`]: a secret holder that wipes itself on release
//! - [`Qualifier`] and [`resolve`]: selection among several bound
//!   configurations
//! - [`ConfigurableProvider`]: instances built from resolved configurations
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use knobs::ConfigurationsBuilder;
//!
//! let configurations = ConfigurationsBuilder::new()
//!     .put("server.timeout", "1 minute 30 seconds")
//!     .put("server.password", "hunter2")
//!     .build();
//!
//! let timeout = configurations.get_duration("server.timeout").unwrap();
//! assert_eq!(timeout.num_seconds(), 90);
//!
//! let password = configurations.get_password("server.password").unwrap();
//! assert_eq!(password.get().unwrap().len(), 7);
//! password.release();
//! assert!(password.get().is_err());
//! ```

pub mod config;
pub mod duration;
pub mod error;
pub mod logging;
pub mod password;
pub mod provider;

// Re-export key types at crate root for convenience
pub use config::{ConfigLoader, Configurations, ConfigurationsBuilder, EnvironmentOverlay, Format};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use password::Password;
pub use provider::{resolve, ConfigurableProvider, ConfigurationsLookup, Marker, Qualifier};
