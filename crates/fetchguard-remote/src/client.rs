//! HTTP client for the protection service

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;

use fetchguard_config::{Config, ConfigFetcher, FetchError, RemoteConfigPayload};
use fetchguard_intercept::{
    HistoryRecord, ProtectError, ProtectRequest, ProtectResponse, ProtectService,
};

use crate::error::RemoteError;
use crate::Result;

/// Header carrying the account API key.
const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying cookies collected for the download's own domain.
const FORWARDED_COOKIES_HEADER: &str = "x-forwarded-cookies";

/// Bound on the protect call specifically: the resume-on-failure safety
/// net depends on this call reaching an outcome.
const PROTECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the protection service API.
///
/// Two underlying clients implement the mutually exclusive auth rule: the
/// keyed client carries no cookie jar, the session client nothing but its
/// jar. Cheap to clone; clones share the connection pools.
#[derive(Clone)]
pub struct RemoteClient {
    /// Used when an API key is configured; sends no cookies.
    keyed: Client,
    /// Used otherwise; the ambient session cookie jar authenticates.
    session: Client,
}

impl RemoteClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            keyed: Client::builder().build()?,
            session: Client::builder().cookie_store(true).build()?,
        })
    }

    fn endpoint(config: &Config, path: &str) -> String {
        format!(
            "{}/api/{}",
            config.service_base_url.trim_end_matches('/'),
            path
        )
    }

    fn request(&self, config: &Config, method: Method, path: &str) -> RequestBuilder {
        let url = Self::endpoint(config, path);
        match config.active_api_key() {
            Some(key) => self.keyed.request(method, url).header(API_KEY_HEADER, key),
            None => self.session.request(method, url),
        }
    }

    /// Connectivity probe for settings surfaces; the interception path
    /// never calls this.
    pub async fn ping(&self, config: &Config) -> Result<()> {
        let response = self.request(config, Method::GET, "ping").send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigFetcher for RemoteClient {
    async fn fetch_config(
        &self,
        config: &Config,
    ) -> std::result::Result<RemoteConfigPayload, FetchError> {
        let response = self
            .request(config, Method::GET, "config")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(RemoteConfigPayload::from_value(&body))
    }
}

#[async_trait]
impl ProtectService for RemoteClient {
    async fn protect(
        &self,
        config: &Config,
        request: &ProtectRequest,
        forwarded_cookies: &str,
    ) -> std::result::Result<ProtectResponse, ProtectError> {
        let mut builder = self
            .request(config, Method::POST, "proxy-protect")
            .timeout(PROTECT_TIMEOUT)
            .json(request);
        if !forwarded_cookies.is_empty() {
            builder = builder.header(FORWARDED_COOKIES_HEADER, forwarded_cookies);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProtectError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtectError::Status(status.as_u16()));
        }

        response
            .json::<ProtectResponse>()
            .await
            .map_err(|e| ProtectError::Decode(e.to_string()))
    }

    fn report_history(&self, config: &Config, record: HistoryRecord) {
        let client = self.clone();
        let config = config.clone();
        // Detached on purpose; the report's result is ignored.
        tokio::spawn(async move {
            let result = client
                .request(&config, Method::POST, "history")
                .json(&record)
                .send()
                .await;

            match result {
                Ok(response) if !response.status().is_success() => {
                    tracing::debug!(status = %response.status(), "History report rejected");
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("History report failed: {}", e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetchguard_config::ConfigPatch;

    fn config_with(patch: ConfigPatch) -> Config {
        Config::default().apply(patch)
    }

    #[test]
    fn test_endpoint_joining_trims_trailing_slash() {
        let config = config_with(ConfigPatch {
            service_base_url: Some("https://guard.internal/".to_string()),
            ..ConfigPatch::default()
        });
        assert_eq!(
            RemoteClient::endpoint(&config, "config"),
            "https://guard.internal/api/config"
        );
        assert_eq!(
            RemoteClient::endpoint(&Config::default(), "proxy-protect"),
            "https://protect.example.com/api/proxy-protect"
        );
    }

    #[test]
    fn test_api_key_header_applied_when_configured() {
        let client = RemoteClient::new().unwrap();
        let config = config_with(ConfigPatch {
            api_key: Some("k-123".to_string()),
            ..ConfigPatch::default()
        });

        let request = client
            .request(&config, Method::GET, "config")
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(API_KEY_HEADER).unwrap(),
            "k-123"
        );
        assert_eq!(
            request.url().as_str(),
            "https://protect.example.com/api/config"
        );
    }

    #[test]
    fn test_no_api_key_header_without_key() {
        let client = RemoteClient::new().unwrap();

        let request = client
            .request(&Config::default(), Method::GET, "config")
            .build()
            .unwrap();
        assert!(request.headers().get(API_KEY_HEADER).is_none());
    }

    #[test]
    fn test_forwarded_cookies_attached_only_when_present() {
        let client = RemoteClient::new().unwrap();
        let body = ProtectRequest {
            url: "https://app.box.com/file/123".to_string(),
            filename_hint: None,
            rename_suffix: "_PRT".to_string(),
            overwrite_if_exists: true,
        };

        let with_cookies = client
            .request(&Config::default(), Method::POST, "proxy-protect")
            .json(&body)
            .header(FORWARDED_COOKIES_HEADER, "sid=abc")
            .build()
            .unwrap();
        assert_eq!(
            with_cookies.headers().get(FORWARDED_COOKIES_HEADER).unwrap(),
            "sid=abc"
        );

        let without_cookies = client
            .request(&Config::default(), Method::POST, "proxy-protect")
            .json(&body)
            .build()
            .unwrap();
        assert!(without_cookies
            .headers()
            .get(FORWARDED_COOKIES_HEADER)
            .is_none());
    }
}
