//! Layered construction of [`Configurations`].
//!
//! Layers are merged from lowest to highest precedence:
//!
//! 1. Bases, in the order they were added (later bases win)
//! 2. The environment overlay, if any
//! 3. Explicit [`ConfigurationsBuilder::put`] overrides
//!
//! For each key the highest layer holding a value wins.

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::{ConfigLoader, Configurations, EnvironmentOverlay};
use crate::error::Result;

/// Builder for immutable [`Configurations`].
///
/// # Examples
///
/// ```
/// use knobs::config::ConfigurationsBuilder;
/// use knobs::Configurations;
///
/// let base: Configurations = [("foo", "base"), ("bar", "base")].into_iter().collect();
///
/// let configurations = ConfigurationsBuilder::new()
///     .base(base)
///     .put("foo", "a")
///     .build();
///
/// assert_eq!(configurations.get_string("foo", ""), "a");
/// assert_eq!(configurations.get_string("bar", ""), "base");
/// ```
#[derive(Debug, Default)]
pub struct ConfigurationsBuilder {
    bases: Vec<Configurations>,
    environment: Option<EnvironmentOverlay>,
    overrides: BTreeMap<String, String>,
}

impl ConfigurationsBuilder {
    /// Create a new builder with no layers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a base layer above any previously added bases.
    #[must_use]
    pub fn base(mut self, configurations: Configurations) -> Self {
        self.bases.push(configurations);
        self
    }

    /// Loads `path` and adds it as a base layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded (see
    /// [`ConfigLoader::load_file`]).
    pub fn load(self, path: &Path) -> Result<Self> {
        let configurations = ConfigLoader::load_file(path)?;
        Ok(self.base(configurations))
    }

    /// Sets the environment overlay, replacing any previous one.
    #[must_use]
    pub fn environment(mut self, overlay: EnvironmentOverlay) -> Self {
        self.environment = Some(overlay);
        self
    }

    /// Sets an explicit override; the last value put for a key wins.
    #[must_use]
    pub fn put(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Sets several explicit overrides.
    #[must_use]
    pub fn put_all<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Merges all layers into one immutable [`Configurations`].
    #[must_use]
    pub fn build(self) -> Configurations {
        let environment = self
            .environment
            .map(|overlay| overlay.configurations())
            .unwrap_or_default();
        let overrides = Configurations::from(self.overrides);

        log::debug!(
            "Building configurations from {} base(s), {} environment and {} explicit key(s)",
            self.bases.len(),
            environment.len(),
            overrides.len()
        );

        self.bases
            .iter()
            .chain([&environment, &overrides])
            .fold(Configurations::empty(), |merged, layer| merged.merge(layer))
    }
}
