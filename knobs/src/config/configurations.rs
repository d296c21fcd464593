//! The immutable [`Configurations`] mapping and its typed accessors.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::TimeDelta;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::config::flatten::flatten;
use crate::duration;
use crate::error::{Error, Result};
use crate::password::Password;

static EMPTY: LazyLock<Configurations> = LazyLock::new(|| Configurations {
    entries: Arc::new(BTreeMap::new()),
});

/// An immutable mapping from dotted keys to string values.
///
/// Instances are cheap to clone (the entries are shared) and safe to read
/// from many threads. Every "modification" produces a new instance.
///
/// # Examples
///
/// ```
/// use knobs::config::ConfigurationsBuilder;
///
/// let configurations = ConfigurationsBuilder::new()
///     .put("database.url", "postgres://localhost/app")
///     .put("database.timeout", "30s")
///     .build();
///
/// assert_eq!(configurations.get_string("database.url", ""), "postgres://localhost/app");
/// assert_eq!(configurations.get_string("database.user", "app"), "app");
/// assert_eq!(configurations.get_duration("database.timeout").unwrap().num_seconds(), 30);
/// assert!(configurations.get_duration("database.retry").unwrap_err().is_missing_key());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Configurations {
    entries: Arc<BTreeMap<String, String>>,
}

impl Configurations {
    /// Returns the shared, empty configurations.
    ///
    /// # Examples
    ///
    /// ```
    /// use knobs::Configurations;
    ///
    /// let empty = Configurations::empty();
    /// assert_eq!(empty.len(), 0);
    /// assert_eq!(empty.get_string("anything", "fallback"), "fallback");
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// Builds configurations by flattening a nested map.
    ///
    /// # Errors
    ///
    /// Returns an error if the map nests too deeply to flatten.
    pub fn wrap(map: &Map<String, Value>) -> Result<Self> {
        Ok(flatten(map)?.into())
    }

    /// Builds configurations from a parsed document.
    ///
    /// `null` is treated as an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the document is neither a map
    /// nor `null`, or if it nests too deeply.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::wrap(map),
            Value::Null => Ok(Self::empty()),
            other => Err(Error::invalid_argument(format!(
                "configurations must be a map, found {}",
                kind_of(other)
            ))),
        }
    }

    /// Returns the raw value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value for `key`, or `default` when the key is absent.
    #[must_use]
    pub fn get_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Parses the value for `key` as a duration literal.
    ///
    /// See [`crate::duration`] for the accepted syntaxes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] if the key is absent, or
    /// [`Error::Parse`] if the value is not a valid duration.
    pub fn get_duration(&self, key: &str) -> Result<TimeDelta> {
        let raw = self.require(key)?;
        duration::parse(raw).map_err(|e| e.for_key(key))
    }

    /// Parses the value for `key` as a duration, or returns `default` when
    /// the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the key is present but invalid.
    pub fn get_duration_or(&self, key: &str, default: TimeDelta) -> Result<TimeDelta> {
        match self.get_duration(key) {
            Err(Error::MissingKey { .. }) => Ok(default),
            other => other,
        }
    }

    /// Wraps the value for `key` in a [`Password`].
    ///
    /// The returned password owns a copy of the characters; dropping it
    /// wipes that copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] if the key is absent, or
    /// [`Error::Parse`] if the value is empty.
    pub fn get_password(&self, key: &str) -> Result<Password> {
        let raw = self.require(key)?;
        if raw.is_empty() {
            return Err(Error::parse("password", "empty value").for_key(key));
        }
        Password::try_from(raw)
    }

    /// Parses the value for `key` as a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] if the key is absent, or
    /// [`Error::Parse`] if the value is not an integer.
    pub fn get_integer(&self, key: &str) -> Result<i64> {
        let raw = self.require(key)?;
        raw.trim().parse().map_err(|e| {
            Error::parse("integer", format!("'{raw}' is not an integer: {e}")).for_key(key)
        })
    }

    /// Parses the value for `key` as a boolean.
    ///
    /// Accepts `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`, ignoring
    /// case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] if the key is absent, or
    /// [`Error::Parse`] if the value is not a recognized boolean.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let raw = self.require(key)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(Error::parse("boolean", format!("'{raw}' is not a boolean")).for_key(key)),
        }
    }

    /// Returns `true` if a value is present for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over all keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the entries under `prefix.` with that prefix removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use knobs::config::ConfigurationsBuilder;
    ///
    /// let configurations = ConfigurationsBuilder::new()
    ///     .put("database.url", "postgres://localhost/app")
    ///     .put("database.pool.size", "10")
    ///     .put("server.port", "8080")
    ///     .build();
    ///
    /// let database = configurations.extract("database");
    /// assert_eq!(database.len(), 2);
    /// assert_eq!(database.get("pool.size"), Some("10"));
    /// ```
    #[must_use]
    pub fn extract(&self, prefix: &str) -> Self {
        let prefix = format!("{prefix}.");
        self.entries
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, value)| {
                let stripped = &key[prefix.len()..];
                (!stripped.is_empty()).then(|| (stripped.to_string(), value.clone()))
            })
            .collect()
    }

    /// Returns new configurations where entries in `overrides` replace
    /// entries with the same key in `self`.
    #[must_use]
    pub fn merge(&self, overrides: &Self) -> Self {
        if overrides.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return overrides.clone();
        }
        let mut entries = (*self.entries).clone();
        entries.extend(
            overrides
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        entries.into()
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
        })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a map",
    }
}

impl Default for Configurations {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<BTreeMap<String, String>> for Configurations {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Configurations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<BTreeMap<_, _>>()
            .into()
    }
}

impl fmt::Debug for Configurations {
    /// Lists keys only; values may hold secrets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configurations")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Serialize for Configurations {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
