//! Download event model

use serde::{Deserialize, Serialize};

/// A newly observed download, as reported by the host.
///
/// All fields except `id` are optional on the host side; empty strings are
/// treated the same as absent values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadEvent {
    /// Host-issued download identifier.
    pub id: String,
    pub url: Option<String>,
    /// Post-redirect URL; authoritative over `url` when both are present.
    pub final_url: Option<String>,
    pub filename: Option<String>,
    pub suggested_filename: Option<String>,
}

impl DownloadEvent {
    /// The URL to act on, if any.
    pub fn effective_url(&self) -> Option<&str> {
        non_empty(self.final_url.as_deref()).or_else(|| non_empty(self.url.as_deref()))
    }

    /// Filename to fall back on when the service does not suggest one.
    pub fn preferred_filename(&self) -> Option<&str> {
        non_empty(self.filename.as_deref())
            .or_else(|| non_empty(self.suggested_filename.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// How the host should handle a filename collision for the replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    Overwrite,
    Uniquify,
}

impl ConflictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictPolicy::Overwrite => "overwrite",
            ConflictPolicy::Uniquify => "uniquify",
        }
    }

    pub fn from_overwrite(overwrite: bool) -> Self {
        if overwrite {
            ConflictPolicy::Overwrite
        } else {
            ConflictPolicy::Uniquify
        }
    }
}
