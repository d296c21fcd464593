//! Qualifiers distinguishing multiple bound [`Configurations`](crate::Configurations).

use std::borrow::Cow;
use std::fmt;

/// Identifies a kind of qualifier, the way an annotation type would.
///
/// # Examples
///
/// ```
/// use knobs::provider::Marker;
///
/// const DATABASE: Marker = Marker::from_static("Database");
/// assert_eq!(DATABASE.name(), "Database");
/// assert_eq!(DATABASE, Marker::new("Database"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker(Cow<'static, str>);

impl Marker {
    /// The marker carried by [`Qualifier::named`] qualifiers.
    pub const NAMED: Self = Self::from_static("Named");

    /// Creates a marker from a static name.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a marker from any name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The marker's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Selects one of several bound configurations.
///
/// # Examples
///
/// ```
/// use knobs::provider::{Marker, Qualifier};
///
/// let named = Qualifier::named("primary");
/// assert!(named.has_attributes());
/// assert_eq!(named.without_attributes(), Qualifier::Marker(Marker::NAMED));
/// assert_eq!(named.to_string(), "@Named(\"primary\")");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// No qualifier: the default binding.
    #[default]
    Unqualified,
    /// A bare marker without attributes.
    Marker(Marker),
    /// A marker carrying a value, such as a name.
    Annotated {
        /// The marker type.
        marker: Marker,
        /// The marker's attribute value.
        value: String,
    },
}

impl Qualifier {
    /// A qualifier selecting bindings named `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Annotated {
            marker: Marker::NAMED,
            value: name.into(),
        }
    }

    /// A qualifier made of `marker` and an attribute value.
    #[must_use]
    pub fn annotated(marker: Marker, value: impl Into<String>) -> Self {
        Self::Annotated {
            marker,
            value: value.into(),
        }
    }

    /// Returns `true` if the qualifier carries an attribute value.
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        matches!(self, Self::Annotated { .. })
    }

    /// The same qualifier with its attribute value stripped.
    #[must_use]
    pub fn without_attributes(&self) -> Self {
        match self {
            Self::Annotated { marker, .. } => Self::Marker(marker.clone()),
            other => other.clone(),
        }
    }

    /// The qualifier's marker, if it has one.
    #[must_use]
    pub fn marker(&self) -> Option<&Marker> {
        match self {
            Self::Unqualified => None,
            Self::Marker(marker) | Self::Annotated { marker, .. } => Some(marker),
        }
    }
}

impl From<Marker> for Qualifier {
    fn from(marker: Marker) -> Self {
        Self::Marker(marker)
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unqualified => write!(f, "<unqualified>"),
            Self::Marker(marker) => write!(f, "{marker}"),
            Self::Annotated { marker, value } => write!(f, "{marker}({value:?})"),
        }
    }
}
