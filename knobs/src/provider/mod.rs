//! Selection of configurations by qualifier, and providers built on it.
//!
//! Several [`Configurations`](crate::Configurations) may be bound at once,
//! each under a [`Qualifier`]. [`resolve`] picks the most specific binding
//! available for a requested qualifier and degrades gracefully:
//!
//! | Requested              | Tried, in order                                   |
//! |------------------------|---------------------------------------------------|
//! | `@Named("x")`          | `@Named("x")`, `@Named`, unqualified, empty       |
//! | `@Db`                  | `@Db`, unqualified, empty                         |
//! | unqualified            | unqualified, empty                                |
//!
//! Bindings are looked up through the [`ConfigurationsLookup`] trait, so any
//! registry can back the resolver. [`ConfigurationsRegistry`] is a simple
//! in-memory one.

pub mod configurable;
pub mod qualifier;
pub mod resolver;

pub use configurable::ConfigurableProvider;
pub use qualifier::{Marker, Qualifier};
pub use resolver::{lookup_fn, resolve, ConfigurationsLookup, ConfigurationsRegistry, FnLookup};
