//! Providers that build instances from resolved [`Configurations`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::config::Configurations;
use crate::error::{BoxError, Error, Result};
use crate::provider::{resolve, ConfigurationsLookup, Marker, Qualifier};

type Factory<T> = dyn Fn(&Configurations) -> anyhow::Result<T> + Send + Sync;

/// Where a provider takes its configurations from.
#[derive(Debug, Clone)]
enum Source {
    Resolved(Qualifier),
    Explicit(Configurations),
}

/// Builds instances of `T` from the configurations selected by a qualifier.
///
/// By default the provider resolves the unqualified configurations and caches
/// the first instance it creates.
///
/// # Examples
///
/// ```
/// use knobs::provider::{ConfigurableProvider, ConfigurationsRegistry, Qualifier};
///
/// let mut registry = ConfigurationsRegistry::new();
/// registry.bind_named("db", [("url", "postgres://localhost")].into_iter().collect());
///
/// let provider = ConfigurableProvider::new("database-url", |configurations| {
///     Ok(configurations.get_string("url", "sqlite::memory:").to_string())
/// })
/// .with_name("db")
/// .unwrap();
///
/// assert_eq!(*provider.provide(&registry).unwrap(), "postgres://localhost");
/// ```
pub struct ConfigurableProvider<T> {
    name: String,
    source: Source,
    singleton: bool,
    factory: Box<Factory<T>>,
    instance: OnceLock<Arc<T>>,
}

impl<T> ConfigurableProvider<T> {
    /// Creates a singleton provider named `name` around `factory`.
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Configurations) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            source: Source::Resolved(Qualifier::Unqualified),
            singleton: true,
            factory: Box::new(factory),
            instance: OnceLock::new(),
        }
    }

    /// Uses `configurations` as is, skipping resolution entirely.
    #[must_use]
    pub fn with_configurations(mut self, configurations: Configurations) -> Self {
        self.source = Source::Explicit(configurations);
        self
    }

    /// Resolves the configurations bound under `qualifier`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if explicit configurations were
    /// already set with [`with_configurations`](Self::with_configurations).
    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Result<Self> {
        if matches!(self.source, Source::Explicit(_)) {
            return Err(Error::invalid_argument("Configurations already set up"));
        }
        self.source = Source::Resolved(qualifier);
        Ok(self)
    }

    /// Resolves the configurations bound under [`Qualifier::named`].
    ///
    /// # Errors
    ///
    /// See [`with_qualifier`](Self::with_qualifier).
    pub fn with_name(self, name: impl Into<String>) -> Result<Self> {
        self.with_qualifier(Qualifier::named(name))
    }

    /// Resolves the configurations bound under a bare marker.
    ///
    /// # Errors
    ///
    /// See [`with_qualifier`](Self::with_qualifier).
    pub fn with_marker(self, marker: Marker) -> Result<Self> {
        self.with_qualifier(Qualifier::Marker(marker))
    }

    /// Whether the first created instance is cached and shared.
    #[must_use]
    pub fn singleton(mut self, singleton: bool) -> Self {
        self.singleton = singleton;
        self
    }

    /// The provider's name, as reported in provisioning errors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configurations the factory would receive.
    ///
    /// # Errors
    ///
    /// Returns the lookup's error if resolution fails.
    pub fn configurations<L>(&self, lookup: &L) -> std::result::Result<Configurations, L::Error>
    where
        L: ConfigurationsLookup + ?Sized,
    {
        match &self.source {
            Source::Explicit(configurations) => Ok(configurations.clone()),
            Source::Resolved(qualifier) => resolve(lookup, qualifier),
        }
    }

    /// Returns the cached instance, or creates one from the resolved
    /// configurations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Provision`] if resolution or the factory fails.
    pub fn provide<L>(&self, lookup: &L) -> Result<Arc<T>>
    where
        L: ConfigurationsLookup + ?Sized,
        L::Error: Into<BoxError>,
    {
        if self.singleton {
            if let Some(instance) = self.instance.get() {
                return Ok(Arc::clone(instance));
            }
        }

        let configurations = self
            .configurations(lookup)
            .map_err(|e| self.provision_error(e.into()))?;
        log::debug!(
            "Providing instance in {} from {} configuration key(s)",
            self.name,
            configurations.len()
        );
        let created = (self.factory)(&configurations).map_err(|e| self.provision_error(e.into()))?;

        if self.singleton {
            Ok(Arc::clone(self.instance.get_or_init(|| Arc::new(created))))
        } else {
            Ok(Arc::new(created))
        }
    }

    fn provision_error(&self, cause: BoxError) -> Error {
        Error::Provision {
            provider: self.name.clone(),
            cause,
        }
    }
}

impl<T> fmt::Debug for ConfigurableProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurableProvider")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("singleton", &self.singleton)
            .field("cached", &self.instance.get().is_some())
            .finish_non_exhaustive()
    }
}
