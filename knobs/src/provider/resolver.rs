//! Qualifier-based selection of bound [`Configurations`].

use std::collections::HashMap;
use std::convert::Infallible;

use crate::config::Configurations;
use crate::provider::{Marker, Qualifier};

/// Looks up the configurations bound under an exact qualifier.
///
/// Implemented by whatever registry holds the bindings.
pub trait ConfigurationsLookup {
    /// Failure reported by the registry itself.
    type Error;

    /// Returns the configurations bound under exactly `qualifier`, if any.
    ///
    /// # Errors
    ///
    /// Returns the registry's own error if the lookup cannot be performed.
    fn lookup(&self, qualifier: &Qualifier) -> Result<Option<Configurations>, Self::Error>;
}

/// Picks the configurations for `qualifier`, falling back from the most to
/// the least specific binding.
///
/// The lookups, first match wins:
///
/// 1. the exact qualifier, attributes included;
/// 2. if it has attributes, the bare marker without them;
/// 3. if it has a marker, the unqualified binding;
/// 4. otherwise [`Configurations::empty`].
///
/// # Errors
///
/// Registry failures are returned unchanged; nothing is retried.
///
/// # Examples
///
/// ```
/// use knobs::provider::{resolve, ConfigurationsRegistry, Qualifier};
/// use knobs::Configurations;
///
/// let mut registry = ConfigurationsRegistry::new();
/// registry.bind(Qualifier::Unqualified, [("foo", "default")].into_iter().collect());
///
/// // An unbound name degrades to the unqualified binding.
/// let resolved = resolve(&registry, &Qualifier::named("missing")).unwrap();
/// assert_eq!(resolved.get("foo"), Some("default"));
/// ```
pub fn resolve<L>(lookup: &L, qualifier: &Qualifier) -> Result<Configurations, L::Error>
where
    L: ConfigurationsLookup + ?Sized,
{
    if let Some(found) = lookup.lookup(qualifier)? {
        log::trace!("Resolved configurations for {qualifier}");
        return Ok(found);
    }

    if qualifier.has_attributes() {
        let stripped = qualifier.without_attributes();
        if let Some(found) = lookup.lookup(&stripped)? {
            log::trace!("Resolved configurations for {qualifier} via {stripped}");
            return Ok(found);
        }
    }

    if qualifier.marker().is_some() {
        if let Some(found) = lookup.lookup(&Qualifier::Unqualified)? {
            log::trace!("Resolved configurations for {qualifier} via the unqualified binding");
            return Ok(found);
        }
    }

    log::trace!("No configurations bound for {qualifier}; using empty configurations");
    Ok(Configurations::empty())
}

/// Adapts a closure into a [`ConfigurationsLookup`].
///
/// # Examples
///
/// ```
/// use knobs::provider::{lookup_fn, resolve, Qualifier};
/// use knobs::Configurations;
///
/// let lookup = lookup_fn(|qualifier: &Qualifier| {
///     (*qualifier == Qualifier::Unqualified).then(Configurations::empty)
/// });
/// assert!(resolve(&lookup, &Qualifier::named("x")).unwrap().is_empty());
/// ```
pub fn lookup_fn<F>(f: F) -> FnLookup<F>
where
    F: Fn(&Qualifier) -> Option<Configurations>,
{
    FnLookup(f)
}

/// A [`ConfigurationsLookup`] backed by a closure; see [`lookup_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnLookup<F>(F);

impl<F> ConfigurationsLookup for FnLookup<F>
where
    F: Fn(&Qualifier) -> Option<Configurations>,
{
    type Error = Infallible;

    fn lookup(&self, qualifier: &Qualifier) -> Result<Option<Configurations>, Infallible> {
        Ok((self.0)(qualifier))
    }
}

/// An in-memory binding registry.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationsRegistry {
    bindings: HashMap<Qualifier, Configurations>,
}

impl ConfigurationsRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `configurations` under `qualifier`, replacing any previous
    /// binding.
    pub fn bind(&mut self, qualifier: Qualifier, configurations: Configurations) -> &mut Self {
        self.bindings.insert(qualifier, configurations);
        self
    }

    /// Binds `configurations` under [`Qualifier::named`].
    pub fn bind_named(
        &mut self,
        name: impl Into<String>,
        configurations: Configurations,
    ) -> &mut Self {
        self.bind(Qualifier::named(name), configurations)
    }

    /// Binds `configurations` under a bare marker.
    pub fn bind_marker(&mut self, marker: Marker, configurations: Configurations) -> &mut Self {
        self.bind(Qualifier::Marker(marker), configurations)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl ConfigurationsLookup for ConfigurationsRegistry {
    type Error = Infallible;

    fn lookup(&self, qualifier: &Qualifier) -> Result<Option<Configurations>, Infallible> {
        Ok(self.bindings.get(qualifier).cloned())
    }
}
