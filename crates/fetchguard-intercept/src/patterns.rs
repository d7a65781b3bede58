//! URL pattern policy

use regex::{Regex, RegexBuilder};

/// Compiled URL match policy.
///
/// Patterns are compiled case-insensitively. An entry that fails to
/// compile is skipped and never matches; the remaining patterns are
/// unaffected.
pub struct UrlPatterns {
    patterns: Vec<Regex>,
}

impl UrlPatterns {
    pub fn compile(patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|raw| {
                match RegexBuilder::new(raw).case_insensitive(true).build() {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        tracing::debug!(pattern = %raw, "Ignoring invalid URL pattern: {}", e);
                        None
                    }
                }
            })
            .collect();

        Self { patterns }
    }

    /// True if any configured pattern matches `url`. False on an empty set.
    pub fn is_match(&self, url: &str) -> bool {
        self.patterns.iter().any(|regex| regex.is_match(url))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
