//! Flattening of nested structures into dotted keys.
//!
//! Nested maps contribute their key as a prefix for their children, so
//! `{"database": {"pool": {"size": 10}}}` becomes `database.pool.size = 10`.
//! Arrays are treated as maps keyed by index, scalars are stored as their
//! canonical text, and `null` leaves are dropped.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Deepest nesting accepted by [`flatten`].
pub const MAX_DEPTH: usize = 64;

/// Flattens a nested map into dotted keys.
///
/// When two paths produce the same dotted key, the one visited last wins.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the input nests deeper than
/// [`MAX_DEPTH`] levels.
///
/// # Examples
///
/// ```
/// use knobs::config::flatten;
/// use serde_json::json;
///
/// let nested = json!({"database": {"pool": {"size": 10}}, "debug": true});
/// let flat = flatten(nested.as_object().unwrap()).unwrap();
///
/// assert_eq!(flat["database.pool.size"], "10");
/// assert_eq!(flat["debug"], "true");
/// ```
pub fn flatten(map: &Map<String, Value>) -> Result<BTreeMap<String, String>> {
    let mut flat = BTreeMap::new();
    walk_map(map, "", 1, &mut flat)?;
    Ok(flat)
}

fn walk_map(
    map: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    flat: &mut BTreeMap<String, String>,
) -> Result<()> {
    check_depth(depth)?;
    for (key, value) in map {
        walk(value, join(prefix, key), depth, flat)?;
    }
    Ok(())
}

fn walk(
    value: &Value,
    key: String,
    depth: usize,
    flat: &mut BTreeMap<String, String>,
) -> Result<()> {
    match value {
        Value::Object(map) => walk_map(map, &key, depth + 1, flat)?,
        Value::Array(items) => {
            check_depth(depth + 1)?;
            for (index, item) in items.iter().enumerate() {
                walk(item, join(&key, &index.to_string()), depth + 1, flat)?;
            }
        }
        Value::Null => {}
        Value::String(text) => {
            flat.insert(key, text.clone());
        }
        Value::Bool(_) | Value::Number(_) => {
            flat.insert(key, value.to_string());
        }
    }
    Ok(())
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(Error::invalid_argument(format!(
            "configuration nests deeper than {MAX_DEPTH} levels"
        )));
    }
    Ok(())
}
