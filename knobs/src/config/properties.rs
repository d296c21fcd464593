//! Parsers for Java properties, in text and XML form.
//!
//! Supported text syntax:
//!
//! - `#` and `!` comment lines, blank lines ignored
//! - `key=value`, `key: value` or `key value` separators
//! - line continuation with a trailing (unescaped) backslash
//! - escapes `\t`, `\n`, `\r`, `\f`, `\\` and `\uXXXX`; any other escaped
//!   character stands for itself (so `\=` and `\:` embed separators in keys)
//!
//! The XML form is a `<properties>` root holding `<entry key="...">value</entry>`
//! elements; `<comment>` elements are skipped.
//!
//! In both forms later duplicates replace earlier ones.

use std::borrow::Cow;
use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

const VALUE_KIND: &str = "properties";
const XML_VALUE_KIND: &str = "XML properties";

/// Parses properties text into a flat map.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed `\u` escapes.
///
/// # Examples
///
/// ```
/// use knobs::config::properties;
///
/// let parsed = properties::parse("# comment\ndatabase.url = jdbc:h2:mem\nname: knobs\n").unwrap();
/// assert_eq!(parsed["database.url"], "jdbc:h2:mem");
/// assert_eq!(parsed["name"], "knobs");
/// ```
pub fn parse(text: &str) -> Result<BTreeMap<String, String>> {
    let mut entries = BTreeMap::new();
    for (line_number, logical) in logical_lines(text) {
        let (key, value) = split_entry(&logical);
        let key = unescape(key).map_err(|e| at_line(e, line_number))?;
        let value = unescape(value).map_err(|e| at_line(e, line_number))?;
        entries.insert(key, value);
    }
    Ok(entries)
}

/// Joins continuation lines, dropping comments and blank lines.
///
/// Yields the 1-based number of the first physical line of each entry.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim_start();
        match current.as_mut() {
            Some((_, buffer)) => buffer.push_str(line),
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                current = Some((index + 1, line.to_string()));
            }
        }

        let continues = current
            .as_ref()
            .is_some_and(|(_, buffer)| ends_with_continuation(buffer));
        if continues {
            if let Some((_, buffer)) = current.as_mut() {
                buffer.pop();
            }
        } else if let Some(done) = current.take() {
            lines.push(done);
        }
    }

    // A dangling continuation on the last line ends the entry.
    lines.extend(current);
    lines
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped separator.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..index], line[index + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[index..].trim_start();
                let rest = rest
                    .strip_prefix(['=', ':'])
                    .map_or(rest, str::trim_start);
                return (&line[..index], rest);
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        Error::parse(VALUE_KIND, format!("malformed \\u escape '\\u{hex}'"))
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn at_line(error: Error, line_number: usize) -> Error {
    match error {
        Error::Parse {
            key,
            value_kind,
            message,
        } => Error::Parse {
            key,
            value_kind,
            message: format!("line {line_number}: {message}"),
        },
        other => other,
    }
}

/// Parses an XML properties document into a flat map.
///
/// Entry values are taken verbatim after XML unescaping; an empty
/// `<entry key="k"/>` maps `k` to the empty string.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed XML, an `<entry>` without a `key`
/// attribute, or a document without a `<properties>` root.
///
/// # Examples
///
/// ```
/// use knobs::config::properties;
///
/// let parsed = properties::parse_xml(
///     r#"<properties><entry key="server.port">8080</entry></properties>"#,
/// )
/// .unwrap();
/// assert_eq!(parsed["server.port"], "8080");
/// ```
pub fn parse_xml(text: &str) -> Result<BTreeMap<String, String>> {
    let mut reader = Reader::from_str(text);
    let mut entries = BTreeMap::new();
    let mut current: Option<(String, String)> = None;
    let mut has_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::parse(
                XML_VALUE_KIND,
                format!("at byte {}: {e}", reader.buffer_position()),
            )
        })?;
        match event {
            Event::Start(element) => match element.name().as_ref() {
                b"properties" => has_root = true,
                b"entry" => current = Some((entry_key(&element)?, String::new())),
                _ => {}
            },
            Event::Empty(element) => match element.name().as_ref() {
                b"properties" => has_root = true,
                b"entry" => {
                    entries.insert(entry_key(&element)?, String::new());
                }
                _ => {}
            },
            Event::Text(content) => {
                if let Some((_, value)) = current.as_mut() {
                    let unescaped = content
                        .unescape()
                        .map_err(|e| Error::parse(XML_VALUE_KIND, e.to_string()))?;
                    value.push_str(&unescaped);
                }
            }
            Event::CData(content) => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(&String::from_utf8_lossy(&content));
                }
            }
            Event::End(element) if element.name().as_ref() == b"entry" => {
                if let Some((key, value)) = current.take() {
                    entries.insert(key, value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !has_root {
        return Err(Error::parse(
            XML_VALUE_KIND,
            "missing <properties> root element",
        ));
    }
    Ok(entries)
}

fn entry_key(element: &BytesStart<'_>) -> Result<String> {
    let attribute = element
        .try_get_attribute("key")
        .map_err(|e| Error::parse(XML_VALUE_KIND, e.to_string()))?
        .ok_or_else(|| Error::parse(XML_VALUE_KIND, "<entry> without a key attribute"))?;
    attribute
        .unescape_value()
        .map(Cow::into_owned)
        .map_err(|e| Error::parse(XML_VALUE_KIND, e.to_string()))
}
