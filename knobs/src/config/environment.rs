//! Environment variable overlays.
//!
//! An [`EnvironmentOverlay`] collects variables sharing a prefix and turns
//! them into dotted keys: with prefix `APP`, the variable
//! `APP_DATABASE__POOL_SIZE` becomes the key `database.pool_size`.
//! Double underscores separate key segments; names are lowercased.

use std::collections::BTreeMap;
use std::env;

use crate::config::Configurations;

/// Key/value pairs taken from prefixed environment variables.
///
/// # Examples
///
/// ```
/// use knobs::config::EnvironmentOverlay;
///
/// let overlay = EnvironmentOverlay::from_vars(
///     "APP",
///     [("APP_DATABASE__URL", "postgres://db/app"), ("PATH", "/usr/bin")],
/// );
///
/// assert_eq!(overlay.len(), 1);
/// assert_eq!(overlay.configurations().get("database.url"), Some("postgres://db/app"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvironmentOverlay {
    prefix: String,
    entries: BTreeMap<String, String>,
}

impl EnvironmentOverlay {
    /// Reads every `PREFIX_*` variable from the process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let vars = env::vars_os().filter_map(|(name, value)| {
            let name = name.into_string().ok()?;
            match value.into_string() {
                Ok(value) => Some((name, value)),
                Err(_) => {
                    if Self::key_for(prefix, &name).is_some() {
                        log::warn!("Skipping environment variable {name}: value is not unicode");
                    }
                    None
                }
            }
        });
        Self::from_vars(prefix, vars)
    }

    /// Builds an overlay from explicit `(name, value)` pairs.
    pub fn from_vars<I, K, V>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries: BTreeMap<String, String> = vars
            .into_iter()
            .filter_map(|(name, value)| {
                Self::key_for(prefix, name.as_ref()).map(|key| (key, value.into()))
            })
            .collect();

        log::debug!(
            "Collected {} configuration override(s) from {}_* environment variables",
            entries.len(),
            prefix.to_ascii_uppercase()
        );

        Self {
            prefix: prefix.to_string(),
            entries,
        }
    }

    /// Maps a variable name to a configuration key, if it carries `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use knobs::config::EnvironmentOverlay;
    ///
    /// assert_eq!(
    ///     EnvironmentOverlay::key_for("app", "APP_SERVER__PORT"),
    ///     Some("server.port".to_string())
    /// );
    /// assert_eq!(EnvironmentOverlay::key_for("app", "OTHER_PORT"), None);
    /// ```
    #[must_use]
    pub fn key_for(prefix: &str, name: &str) -> Option<String> {
        let prefix = format!("{}_", prefix.to_ascii_uppercase());
        let rest = name.strip_prefix(&prefix)?;
        if rest.is_empty() {
            return None;
        }
        let key = rest
            .split("__")
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join(".");
        Some(key)
    }

    /// The prefix this overlay was built with.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of collected variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no variable matched the prefix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The collected variables as configurations.
    #[must_use]
    pub fn configurations(&self) -> Configurations {
        self.entries.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_key_for() {
        assert_eq!(
            EnvironmentOverlay::key_for("APP", "APP_NAME"),
            Some("name".to_string())
        );
        assert_eq!(
            EnvironmentOverlay::key_for("APP", "APP_DATABASE__POOL_SIZE"),
            Some("database.pool_size".to_string())
        );
        assert_eq!(EnvironmentOverlay::key_for("APP", "APP_"), None);
        assert_eq!(EnvironmentOverlay::key_for("APP", "APPNAME"), None);
        assert_eq!(EnvironmentOverlay::key_for("APP", "app_name"), None);
    }

    #[test]
    fn test_from_vars_filters_by_prefix() {
        let overlay = EnvironmentOverlay::from_vars(
            "svc",
            [
                ("SVC_TIMEOUT", "5s"),
                ("SVC_DB__HOST", "localhost"),
                ("HOME", "/root"),
            ],
        );
        assert_eq!(overlay.prefix(), "svc");
        assert_eq!(overlay.len(), 2);

        let configurations = overlay.configurations();
        assert_eq!(configurations.get("timeout"), Some("5s"));
        assert_eq!(configurations.get("db.host"), Some("localhost"));
        assert!(!configurations.contains_key("home"));
    }

    #[test]
    fn test_empty_overlay() {
        let overlay = EnvironmentOverlay::from_vars("X", Vec::<(String, String)>::new());
        assert!(overlay.is_empty());
        assert!(overlay.configurations().is_empty());
    }

    #[test]
    #[serial]
    fn test_new_reads_process_environment() {
        env::set_var("KNOBS_ENVTEST_FEATURE__ENABLED", "true");
        let overlay = EnvironmentOverlay::new("KNOBS_ENVTEST");
        env::remove_var("KNOBS_ENVTEST_FEATURE__ENABLED");

        assert_eq!(
            overlay.configurations().get("feature.enabled"),
            Some("true")
        );
    }
}
