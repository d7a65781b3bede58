//! Cookie forwarding
//!
//! Cookies ride along to the protect endpoint so the service can fetch
//! session-gated files. Collection is strictly best-effort: no cookie
//! failure may block an interception.

use async_trait::async_trait;
use url::Url;

use crate::error::CookieError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// Read-only accessor over the host's cookie jar.
#[async_trait]
pub trait CookieSource: Send + Sync {
    /// All cookies scoped to `host`, in the jar's own order.
    async fn cookies_for_host(&self, host: &str) -> Result<Vec<Cookie>, CookieError>;
}

/// Build the forwarded-cookie header value for `url`.
///
/// Returns `name=value` pairs joined with `"; "`, preserving the jar's
/// order. A malformed URL, a lookup error or an empty jar all yield an
/// empty string.
pub async fn cookie_header<C: CookieSource>(source: &C, url: &str) -> String {
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_string(),
            None => return String::new(),
        },
        Err(e) => {
            tracing::debug!("Not forwarding cookies for unparsable URL: {}", e);
            return String::new();
        }
    };

    match source.cookies_for_host(&host).await {
        Ok(cookies) => cookies
            .iter()
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; "),
        Err(e) => {
            tracing::debug!(host = %host, "Cookie lookup failed: {}", e);
            String::new()
        }
    }
}
