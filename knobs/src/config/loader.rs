//! Loading configurations from files and streams.
//!
//! The format of a file is chosen by its extension:
//!
//! | Extension            | Format                      |
//! |----------------------|-----------------------------|
//! | `.json`, `.js`       | JSON                        |
//! | `.yaml`, `.yml`      | YAML                        |
//! | `.properties`        | Java-properties-style text  |
//! | `.xml`               | Java XML properties         |
//!
//! Every I/O or parse failure is reported as [`Error::Load`] naming the
//! source, with the original failure kept as its cause.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::{properties, Configurations};
use crate::error::{Error, Result};

/// Serialization format of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON documents (`.json`, `.js`).
    Json,
    /// YAML documents (`.yaml`, `.yml`).
    Yaml,
    /// Java-properties-style text (`.properties`).
    Properties,
    /// Java XML properties (`.xml`).
    XmlProperties,
}

impl Format {
    /// Picks the format from a path's extension, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for unknown or missing extensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use knobs::config::Format;
    /// use std::path::Path;
    ///
    /// assert_eq!(Format::from_path(Path::new("app.json")).unwrap(), Format::Json);
    /// assert_eq!(Format::from_path(Path::new("app.properties")).unwrap(), Format::Properties);
    /// assert!(Format::from_path(Path::new("app.ini")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json" | "js") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("properties") => Ok(Self::Properties),
            Some("xml") => Ok(Self::XmlProperties),
            _ => Err(Error::invalid_argument(format!(
                "Invalid file extension for \"{}\"",
                path.display()
            ))),
        }
    }
}

/// Loads [`Configurations`] from files, readers and strings.
///
/// # Examples
///
/// ```no_run
/// use knobs::config::ConfigLoader;
/// use std::path::Path;
///
/// let configurations = ConfigLoader::load_file(Path::new("~/.app/config.json")).unwrap();
/// println!("Loaded {} keys", configurations.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads a file, picking the format from its extension.
    ///
    /// A leading `~` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for unknown extensions, and
    /// [`Error::Load`] if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Configurations> {
        let path = expand_tilde(path)?;
        let format = Format::from_path(&path)?;
        let source_name = path.display().to_string();

        log::debug!("Parsing configurations from file {source_name}");

        let contents = fs::read_to_string(&path).map_err(|e| Error::load(&source_name, e))?;
        Self::parse_str(&contents, format, &source_name)
    }

    /// Reads a whole stream and parses it in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if the stream cannot be read or parsed.
    pub fn load_reader<R: Read>(
        mut reader: R,
        format: Format,
        source_name: &str,
    ) -> Result<Configurations> {
        log::debug!("Parsing configurations from {source_name}");

        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .map_err(|e| Error::load(source_name, e))?;
        Self::parse_str(&contents, format, source_name)
    }

    /// Parses in-memory text in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if the text cannot be parsed or its top level
    /// is not a map.
    pub fn parse_str(text: &str, format: Format, source_name: &str) -> Result<Configurations> {
        let configurations = match format {
            Format::Json => {
                let value: Value =
                    serde_json::from_str(text).map_err(|e| Error::load(source_name, e))?;
                Self::from_document(&value, source_name)?
            }
            Format::Yaml if text.trim().is_empty() => Configurations::empty(),
            Format::Yaml => {
                let value: Value =
                    serde_yaml::from_str(text).map_err(|e| Error::load(source_name, e))?;
                Self::from_document(&value, source_name)?
            }
            Format::Properties => properties::parse(text)
                .map_err(|e| Error::load(source_name, e))?
                .into(),
            Format::XmlProperties => properties::parse_xml(text)
                .map_err(|e| Error::load(source_name, e))?
                .into(),
        };

        log::trace!(
            "Loaded {} configuration key(s) from {source_name}",
            configurations.len()
        );
        Ok(configurations)
    }

    fn from_document(value: &Value, source_name: &str) -> Result<Configurations> {
        Configurations::from_value(value).map_err(|e| Error::load(source_name, e))
    }
}

/// Expands a leading `~` component to the user's home directory.
fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = home::home_dir().ok_or_else(|| {
        Error::invalid_argument(format!(
            "cannot expand {}: home directory unknown",
            path.display()
        ))
    })?;
    Ok(home.join(rest))
}
