//! Flattened configuration trees.
//!
//! Nested configuration is turned into an ordered mapping from a
//! `/`-separated path to a scalar value, e.g.
//! `{"scopes": {"websites": {"base": {"code": "base"}}}}` becomes
//! `scopes/websites/base/code => "base"`.

use serde_json::{Map, Value};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// An ordered path → scalar mapping built from a configuration tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatConfig {
    entries: Map<String, Value>,
}

impl FlatConfig {
    /// Flattens a configuration tree.
    ///
    /// Objects and arrays are walked recursively (array items are keyed by
    /// index); empty containers contribute no entries. A scalar root yields a
    /// single entry with an empty path.
    #[must_use]
    pub fn flatten(tree: &Value) -> Self {
        let mut entries = Map::new();
        flatten_into(&mut entries, String::new(), tree);
        Self { entries }
    }

    /// Returns the entries whose path is `prefix` or lies under it.
    ///
    /// Matching is segment-aware: `scopes/websites` matches
    /// `scopes/websites/base/code` but not `scopes/websites_old`.
    #[must_use]
    pub fn filter_prefix(&self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches(PATH_SEPARATOR);
        let entries = self
            .entries
            .iter()
            .filter(|(path, _)| is_under(path, prefix))
            .map(|(path, value)| (path.clone(), value.clone()))
            .collect();
        Self { entries }
    }

    /// Gets the value stored at an exact path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries.get(path)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(path, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn flatten_into(entries: &mut Map<String, Value>, path: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(entries, join(&path, key), child);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(entries, join(&path, &index.to_string()), child);
            }
        }
        scalar => {
            entries.insert(path, scalar.clone());
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}{PATH_SEPARATOR}{key}")
    }
}

fn is_under(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(PATH_SEPARATOR),
        None => false,
    }
}
