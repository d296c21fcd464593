//! Error types for the knobs library.
//!
//! Every failure a caller can observe is a variant of [`Error`]. Typed
//! accessors always distinguish an absent key ([`Error::MissingKey`]) from a
//! present value that could not be coerced ([`Error::Parse`]), so callers can
//! pick their own fallback.

use thiserror::Error;

/// Result type alias for operations that may fail with a knobs error.
///
/// # Examples
///
/// ```
/// use knobs::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used to carry the original cause of a wrapped failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for the knobs library.
#[derive(Debug, Error)]
pub enum Error {
    /// A typed accessor was called for a key that has no value.
    #[error("missing configuration key '{key}'")]
    MissingKey {
        /// The key that was requested.
        key: String,
    },

    /// A value was present but could not be coerced to the requested type.
    #[error("{}", parse_message(key.as_deref(), value_kind, message))]
    Parse {
        /// The key holding the value, if the value came from a configuration.
        key: Option<String>,
        /// The kind of value that was requested (e.g. "duration").
        value_kind: &'static str,
        /// A description of the problem.
        message: String,
    },

    /// A construction-time contract was violated.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// A description of the violated contract.
        message: String,
    },

    /// A configuration source could not be read or parsed.
    #[error("unable to load configurations from {source_name}: {cause}")]
    Load {
        /// A human readable identifier of the source (path, stream name).
        source_name: String,
        /// The underlying failure.
        #[source]
        cause: BoxError,
    },

    /// A secret was accessed after it was released.
    #[error("password destroyed")]
    Destroyed,

    /// A configurable provider failed to create its instance.
    #[error("exception providing instance in {provider}: {cause}")]
    Provision {
        /// The name of the failing provider.
        provider: String,
        /// The failure reported by the provider's factory.
        #[source]
        cause: BoxError,
    },
}

fn parse_message(key: Option<&str>, value_kind: &str, message: &str) -> String {
    match key {
        Some(key) => format!("invalid {value_kind} for key '{key}': {message}"),
        None => format!("invalid {value_kind}: {message}"),
    }
}

impl Error {
    /// Creates a [`Error::Parse`] not yet associated with a key.
    pub(crate) fn parse(value_kind: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            key: None,
            value_kind,
            message: message.into(),
        }
    }

    /// Creates a [`Error::InvalidArgument`].
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a [`Error::Load`] wrapping `cause`.
    pub(crate) fn load(source_name: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self::Load {
            source_name: source_name.into(),
            cause: cause.into(),
        }
    }

    /// Attaches `key` to a parse error, leaving other variants untouched.
    #[must_use]
    pub(crate) fn for_key(self, key: &str) -> Self {
        match self {
            Self::Parse {
                key: None,
                value_kind,
                message,
            } => Self::Parse {
                key: Some(key.to_string()),
                value_kind,
                message,
            },
            other => other,
        }
    }

    /// Check if error indicates an absent configuration key.
    ///
    /// # Examples
    ///
    /// ```
    /// use knobs::Error;
    ///
    /// let err = Error::MissingKey { key: "database.url".to_string() };
    /// assert!(err.is_missing_key());
    /// ```
    #[must_use]
    pub fn is_missing_key(&self) -> bool {
        matches!(self, Self::MissingKey { .. })
    }

    /// Check if error indicates a present value that failed to parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use knobs::Error;
    ///
    /// let err = knobs::duration::parse("forever").unwrap_err();
    /// assert!(err.is_parse_error());
    /// ```
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
