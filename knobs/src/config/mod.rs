//! Configurations model, loading and layering.
//!
//! This module provides:
//! - [`Configurations`]: an immutable, dotted-key mapping with typed accessors
//! - [`flatten`]: conversion of nested documents into dotted keys
//! - [`ConfigLoader`]: JSON, YAML and properties file loading
//! - [`EnvironmentOverlay`]: `PREFIX_*` environment variable overrides
//! - [`ConfigurationsBuilder`]: layering of bases, environment and overrides
//!
//! # Precedence
//!
//! Layers are merged with the following precedence (highest to lowest):
//!
//! 1. Explicit overrides (via `ConfigurationsBuilder::put`)
//! 2. Environment variables (`PREFIX_*`)
//! 3. Bases, later ones over earlier ones
//!
//! # Examples
//!
//! Loading a file and overriding a key:
//!
//! ```no_run
//! use knobs::config::{ConfigurationsBuilder, EnvironmentOverlay};
//! use std::path::Path;
//!
//! let configurations = ConfigurationsBuilder::new()
//!     .load(Path::new("/etc/app/config.json"))
//!     .unwrap()
//!     .environment(EnvironmentOverlay::new("APP"))
//!     .put("server.port", "9090")
//!     .build();
//!
//! let timeout = configurations.get_duration("server.timeout").unwrap();
//! ```
//!
//! Wrapping an in-memory document:
//!
//! ```
//! use knobs::Configurations;
//! use serde_json::json;
//!
//! let document = json!({"server": {"port": 8080, "timeout": "PT30S"}});
//! let configurations = Configurations::wrap(document.as_object().unwrap()).unwrap();
//!
//! assert_eq!(configurations.get_integer("server.port").unwrap(), 8080);
//! assert_eq!(configurations.get_duration("server.timeout").unwrap().num_seconds(), 30);
//! ```

pub mod builder;
pub mod configurations;
pub mod environment;
pub mod flatten;
pub mod loader;
pub mod properties;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigurationsBuilder;
pub use configurations::Configurations;
pub use environment::EnvironmentOverlay;
pub use flatten::{flatten, MAX_DEPTH};
pub use loader::{ConfigLoader, Format};
