//! Protection service wire types and seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use fetchguard_config::Config;

use crate::error::ProtectError;

/// Body of a protect call. Sent once per intercepted download, never
/// retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectRequest {
    pub url: String,
    pub filename_hint: Option<String>,
    pub rename_suffix: String,
    pub overwrite_if_exists: bool,
}

/// Protect call response, decoded leniently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtectResponse {
    pub ok: bool,
    pub download_url: Option<String>,
    pub suggested_filename: Option<String>,
}

impl ProtectResponse {
    /// The replacement URL, when the service accepted the request.
    /// Substitution requires `ok` and a non-empty `download_url`.
    pub fn replacement_url(&self) -> Option<&str> {
        if !self.ok {
            return None;
        }
        self.download_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// One protection outcome for the service history feed. Write-once;
/// there is no read path on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// ISO-8601 wall-clock time of the substitution.
    pub timestamp: String,
    pub source_url: String,
    /// Host component of `source_url`.
    pub provider_host: String,
    pub protected: bool,
    pub filename: Option<String>,
}

impl HistoryRecord {
    /// A record for a substitution that just happened.
    pub fn protected_now(source_url: &str, filename: Option<&str>) -> Self {
        let provider_host = Url::parse(source_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_default();

        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            source_url: source_url.to_string(),
            provider_host,
            protected: true,
            filename: filename.map(str::to_string),
        }
    }
}

/// Client seam for the protection service.
#[async_trait]
pub trait ProtectService: Send + Sync {
    /// Ask the service to fetch and protect `request.url`.
    /// `forwarded_cookies` is attached as a header when non-empty.
    async fn protect(
        &self,
        config: &Config,
        request: &ProtectRequest,
        forwarded_cookies: &str,
    ) -> Result<ProtectResponse, ProtectError>;

    /// Record an outcome in the service history feed.
    ///
    /// Fire-and-forget: implementations detach the write and the result is
    /// ignored. The call never affects caller state.
    fn report_history(&self, config: &Config, record: HistoryRecord);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = ProtectRequest {
            url: "https://app.box.com/file/123".to_string(),
            filename_hint: Some("report.pdf".to_string()),
            rename_suffix: "_PRT".to_string(),
            overwrite_if_exists: true,
        };

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["url"], "https://app.box.com/file/123");
        assert_eq!(wire["filenameHint"], "report.pdf");
        assert_eq!(wire["renameSuffix"], "_PRT");
        assert_eq!(wire["overwriteIfExists"], true);
    }

    #[test]
    fn test_response_lenient_decode() {
        let response: ProtectResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.ok);
        assert_eq!(response.replacement_url(), None);

        let response: ProtectResponse = serde_json::from_str(
            r#"{"ok":true,"downloadUrl":"https://cdn/x","suggestedFilename":"x_PRT.pdf"}"#,
        )
        .unwrap();
        assert_eq!(response.replacement_url(), Some("https://cdn/x"));
        assert_eq!(response.suggested_filename.as_deref(), Some("x_PRT.pdf"));
    }

    #[test]
    fn test_replacement_requires_ok_and_url() {
        let declined = ProtectResponse {
            ok: false,
            download_url: Some("https://cdn/x".to_string()),
            suggested_filename: None,
        };
        assert_eq!(declined.replacement_url(), None);

        let empty_url = ProtectResponse {
            ok: true,
            download_url: Some(String::new()),
            suggested_filename: None,
        };
        assert_eq!(empty_url.replacement_url(), None);
    }

    #[test]
    fn test_history_record_derives_provider_host() {
        let record = HistoryRecord::protected_now(
            "https://app.box.com/file/123",
            Some("report_PRT.pdf"),
        );
        assert_eq!(record.provider_host, "app.box.com");
        assert!(record.protected);
        assert_eq!(record.filename.as_deref(), Some("report_PRT.pdf"));

        let unparsable = HistoryRecord::protected_now("not a url", None);
        assert_eq!(unparsable.provider_host, "");
    }
}
