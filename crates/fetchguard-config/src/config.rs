//! Guard configuration snapshot

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::payload::RemoteConfigPayload;

pub const DEFAULT_SERVICE_BASE_URL: &str = "https://protect.example.com";
pub const DEFAULT_RENAME_SUFFIX: &str = "_PRT";

/// The full guard configuration.
///
/// Field names follow the service's JSON casing so the same document shape
/// flows through persistence, the settings surface and the config endpoint.
/// Container-level `default` makes any key absent from a stored document
/// fall back to its default, so a snapshot is always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Base URL of the protection service.
    pub service_base_url: String,
    /// Account API key. When set, it replaces session-cookie auth.
    pub api_key: Option<String>,
    pub enable_logging: bool,
    /// Global kill switch for interception.
    pub enable_protection: bool,
    /// Suffix the service appends to protected filenames.
    pub rename_suffix: String,
    /// Overwrite an existing file of the same name instead of uniquifying.
    pub overwrite_if_exists: bool,
    /// Per-provider toggles, e.g. { "box": true, "onedrive": false }.
    pub providers_enabled: HashMap<String, bool>,
    /// Regex strings matched against download URLs.
    pub patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: DEFAULT_SERVICE_BASE_URL.to_string(),
            api_key: None,
            enable_logging: true,
            enable_protection: true,
            rename_suffix: DEFAULT_RENAME_SUFFIX.to_string(),
            overwrite_if_exists: true,
            providers_enabled: HashMap::new(),
            patterns: Vec::new(),
        }
    }
}

impl Config {
    /// The API key to authenticate with, if a non-empty one is configured.
    pub fn active_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Shallow-merge `patch` onto this configuration: keys present in the
    /// patch win, everything else is kept unchanged.
    pub fn apply(&self, patch: ConfigPatch) -> Config {
        let mut next = self.clone();
        if let Some(v) = patch.service_base_url {
            next.service_base_url = v;
        }
        if let Some(v) = patch.api_key {
            next.api_key = Some(v);
        }
        if let Some(v) = patch.enable_logging {
            next.enable_logging = v;
        }
        if let Some(v) = patch.enable_protection {
            next.enable_protection = v;
        }
        if let Some(v) = patch.rename_suffix {
            next.rename_suffix = v;
        }
        if let Some(v) = patch.overwrite_if_exists {
            next.overwrite_if_exists = v;
        }
        if let Some(v) = patch.providers_enabled {
            next.providers_enabled = v;
        }
        if let Some(v) = patch.patterns {
            next.patterns = v;
        }
        next
    }

    /// Merge a config payload pulled from the service onto this snapshot.
    /// Local-only fields (base URL, API key, logging) are untouched; the
    /// service owns the policy fields.
    pub fn merged_with_remote(&self, remote: &RemoteConfigPayload) -> Config {
        Config {
            enable_protection: remote.enable_protection,
            rename_suffix: remote
                .rename_suffix
                .clone()
                .unwrap_or_else(|| self.rename_suffix.clone()),
            overwrite_if_exists: remote.overwrite_if_exists,
            providers_enabled: remote.providers_enabled.clone(),
            patterns: remote.patterns.clone(),
            ..self.clone()
        }
    }
}

/// A partial configuration update; `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    pub service_base_url: Option<String>,
    pub api_key: Option<String>,
    pub enable_logging: Option<bool>,
    pub enable_protection: Option<bool>,
    pub rename_suffix: Option<String>,
    pub overwrite_if_exists: Option<bool>,
    pub providers_enabled: Option<HashMap<String, bool>>,
    pub patterns: Option<Vec<String>>,
}
