//! Standard formatters
//!
//! - [`TextFormatter`]: `key=value` lines, optionally colored
//! - [`JsonFormatter`]: one JSON object per line
//!
//! Both share the reserved-key handling below: a user field whose key
//! collides with the (possibly renamed) `time`, `msg` or `level` key is
//! written as `fields.<key>` instead of overwriting the built-in value.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::core::{FieldValue, Fields};
use std::collections::HashMap;

/// Built-in keys every formatter writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Time,
    Msg,
    Level,
}

impl FieldKey {
    pub const fn default_name(self) -> &'static str {
        match self {
            FieldKey::Time => "time",
            FieldKey::Msg => "msg",
            FieldKey::Level => "level",
        }
    }
}

/// Renames for the built-in keys
///
/// # Example
///
/// ```
/// use rust_hooked_logger::formatters::{FieldKey, FieldMap};
///
/// let map = FieldMap::new().rename(FieldKey::Msg, "message");
/// assert_eq!(map.resolve(FieldKey::Msg), "message");
/// assert_eq!(map.resolve(FieldKey::Level), "level");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    names: HashMap<FieldKey, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rename(mut self, key: FieldKey, name: impl Into<String>) -> Self {
        self.names.insert(key, name.into());
        self
    }

    pub fn resolve(&self, key: FieldKey) -> &str {
        self.names
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_name())
    }

    fn is_reserved(&self, key: &str) -> bool {
        [FieldKey::Time, FieldKey::Msg, FieldKey::Level]
            .iter()
            .any(|&k| self.resolve(k) == key)
    }
}

/// User fields with reserved keys moved under the `fields.` prefix.
///
/// Ordinary keys go in first, so a moved value replaces a literal
/// `fields.<key>` field when both exist.
pub(crate) fn user_fields<'a>(
    data: &'a Fields,
    field_map: &FieldMap,
    sort: bool,
) -> Vec<(String, &'a FieldValue)> {
    let mut out: HashMap<String, &'a FieldValue> = HashMap::with_capacity(data.len());

    for (key, value) in data.iter().filter(|(k, _)| !field_map.is_reserved(k)) {
        out.insert(key.clone(), value);
    }
    for (key, value) in data.iter().filter(|(k, _)| field_map.is_reserved(k)) {
        out.insert(format!("fields.{}", key), value);
    }

    let mut fields: Vec<_> = out.into_iter().collect();
    if sort {
        fields.sort_by(|a, b| a.0.cmp(&b.0));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_reserved_keys_are_prefixed() {
        let data = fields(&[("msg", "user"), ("level", "high"), ("zone", "b")]);
        let out = user_fields(&data, &FieldMap::new(), true);
        let keys: Vec<_> = out.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(keys, vec!["fields.level", "fields.msg", "zone"]);
    }

    #[test]
    fn test_moved_value_wins_over_literal_prefixed_key() {
        let data = fields(&[("time", "moved"), ("fields.time", "literal")]);
        let out = user_fields(&data, &FieldMap::new(), true);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1.as_str(), Some("moved"));
    }

    #[test]
    fn test_clash_check_uses_renamed_keys() {
        let map = FieldMap::new().rename(FieldKey::Msg, "message");
        let data = fields(&[("msg", "kept"), ("message", "moved")]);
        let out = user_fields(&data, &map, true);
        let keys: Vec<_> = out.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(keys, vec!["fields.message", "msg"]);
    }
}
