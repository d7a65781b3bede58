//! Remote configuration payload
//!
//! Config endpoint responses are decoded leniently: a field that is absent
//! or of the wrong shape falls back to its default instead of failing the
//! whole pull.

use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteConfigPayload {
    pub enable_protection: bool,
    pub rename_suffix: Option<String>,
    pub overwrite_if_exists: bool,
    pub providers_enabled: HashMap<String, bool>,
    pub patterns: Vec<String>,
}

impl RemoteConfigPayload {
    /// Decode a config response body. Booleans follow JSON truthiness, so
    /// an absent flag reads as false.
    pub fn from_value(value: &Value) -> Self {
        let rename_suffix = value
            .get("renameSuffix")
            .and_then(Value::as_str)
            .map(str::to_string);

        let providers_enabled = value
            .get("providersEnabled")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .map(|(provider, flag)| (provider.clone(), truthy(flag)))
                    .collect()
            })
            .unwrap_or_default();

        let patterns = value
            .get("patterns")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            enable_protection: value.get("enableProtection").map(truthy).unwrap_or(false),
            rename_suffix,
            overwrite_if_exists: value.get("overwriteIfExists").map(truthy).unwrap_or(false),
            providers_enabled,
            patterns,
        }
    }
}

/// JSON truthiness: null, false, 0 and "" are false, everything else true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
