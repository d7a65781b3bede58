//! The interception state machine
//!
//! Each observed download runs the pipeline
//! `Observed -> (Skipped | Matched) -> Paused -> Protecting ->
//! (Resumed-Failure | Cancelled-Success)`. Events interleave freely; all
//! per-download state is keyed by the event's own identifier. Every path
//! that pauses a download has a corresponding resume on failure, so a
//! download is never left stranded paused.

use fetchguard_config::{Config, ConfigFetcher, ConfigStore, ConfigSync};

use crate::cookies::{cookie_header, CookieSource};
use crate::error::{InterceptError, ProtectError};
use crate::event::{ConflictPolicy, DownloadEvent};
use crate::host::DownloadHost;
use crate::patterns::UrlPatterns;
use crate::protocol::{HistoryRecord, ProtectRequest, ProtectService};

/// Why a download was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Protection is globally disabled.
    Disabled,
    /// The event carries no usable URL.
    NoUrl,
    /// No configured pattern matched.
    NoMatch,
}

/// Why a matched download was handed back to the host untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtectFailure {
    /// The protect call never produced a response.
    Transport(String),
    /// The protect endpoint answered with a non-success status.
    Status(u16),
    /// The service answered but declined, or sent no replacement URL.
    Rejected,
}

/// Terminal state of one interception run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptOutcome {
    /// Not intercepted; the download was never touched.
    Skipped(SkipReason),
    /// Paused, protection failed, original resumed.
    Resumed(ProtectFailure),
    /// Original cancelled, protected replacement started.
    Replaced {
        /// Host identifier of the replacement download.
        download_id: String,
        filename: Option<String>,
    },
}

pub struct Interceptor<H, C, R> {
    store: ConfigStore,
    sync: ConfigSync<R>,
    remote: R,
    host: H,
    cookies: C,
}

impl<H, C, R> Interceptor<H, C, R>
where
    H: DownloadHost,
    C: CookieSource,
    R: ProtectService + ConfigFetcher,
{
    pub fn new(store: ConfigStore, sync: ConfigSync<R>, remote: R, host: H, cookies: C) -> Self {
        Self {
            store,
            sync,
            remote,
            host,
            cookies,
        }
    }

    /// Run the state machine for one observed download.
    ///
    /// Host-primitive failures surface as `Err`; before returning, a
    /// best-effort resume keeps the download from being stranded paused —
    /// except after a successful cancel, where a resume is moot and the
    /// error is surfaced as non-recoverable.
    pub async fn handle(&self, event: &DownloadEvent) -> Result<InterceptOutcome, InterceptError> {
        match self.intercept(event).await {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                if error.resume_recoverable() {
                    if let Err(resume_error) = self.host.resume(&event.id).await {
                        tracing::warn!(
                            download_id = %event.id,
                            "Best-effort resume after failed interception also failed: {}",
                            resume_error
                        );
                    }
                }
                Err(error)
            }
        }
    }

    async fn intercept(&self, event: &DownloadEvent) -> Result<InterceptOutcome, InterceptError> {
        self.store.load();
        // A refresh landing now can change the decision for this very
        // download; a failed refresh leaves the stale snapshot in place.
        self.sync.maybe_refresh().await;
        let config = self.store.current();

        if !config.enable_protection {
            return Ok(InterceptOutcome::Skipped(SkipReason::Disabled));
        }
        let Some(url) = event.effective_url() else {
            return Ok(InterceptOutcome::Skipped(SkipReason::NoUrl));
        };
        if !UrlPatterns::compile(&config.patterns).is_match(url) {
            return Ok(InterceptOutcome::Skipped(SkipReason::NoMatch));
        }

        tracing::info!(download_id = %event.id, url = %url, "Pattern match, pausing download");
        self.host
            .pause(&event.id)
            .await
            .map_err(|source| InterceptError::Pause {
                id: event.id.clone(),
                source,
            })?;

        let forwarded_cookies = cookie_header(&self.cookies, url).await;
        let request = ProtectRequest {
            url: url.to_string(),
            filename_hint: event.preferred_filename().map(str::to_string),
            rename_suffix: config.rename_suffix.clone(),
            overwrite_if_exists: config.overwrite_if_exists,
        };

        let failure = match self
            .remote
            .protect(&config, &request, &forwarded_cookies)
            .await
        {
            Ok(response) => match response.replacement_url() {
                Some(replacement_url) => {
                    let replacement_url = replacement_url.to_string();
                    return self
                        .substitute(
                            event,
                            &config,
                            url,
                            &replacement_url,
                            response.suggested_filename.as_deref(),
                        )
                        .await;
                }
                None => ProtectFailure::Rejected,
            },
            Err(ProtectError::Status(status)) => ProtectFailure::Status(status),
            Err(e) => ProtectFailure::Transport(e.to_string()),
        };

        tracing::warn!(
            download_id = %event.id,
            "Protection failed ({:?}), resuming original download",
            failure
        );
        if let Err(resume_error) = self.host.resume(&event.id).await {
            // The safety net itself failed; nothing further to try here.
            tracing::warn!(
                download_id = %event.id,
                "Failed to resume original download: {}",
                resume_error
            );
        }
        Ok(InterceptOutcome::Resumed(failure))
    }

    /// Swap the paused original for the protected replacement.
    async fn substitute(
        &self,
        event: &DownloadEvent,
        config: &Config,
        source_url: &str,
        replacement_url: &str,
        suggested_filename: Option<&str>,
    ) -> Result<InterceptOutcome, InterceptError> {
        self.host
            .cancel(&event.id)
            .await
            .map_err(|source| InterceptError::Cancel {
                id: event.id.clone(),
                source,
            })?;

        let filename = suggested_filename
            .filter(|name| !name.is_empty())
            .or_else(|| event.preferred_filename())
            .map(str::to_string);
        let conflict = ConflictPolicy::from_overwrite(config.overwrite_if_exists);

        let download_id = self
            .host
            .start(replacement_url, filename.as_deref(), conflict)
            .await
            .map_err(|source| InterceptError::Start {
                id: event.id.clone(),
                source,
            })?;

        tracing::info!(
            download_id = %event.id,
            replacement_id = %download_id,
            "Protected replacement started"
        );

        // Detached; the report's fate never affects the outcome reached.
        self.remote.report_history(
            config,
            HistoryRecord::protected_now(source_url, filename.as_deref()),
        );

        Ok(InterceptOutcome::Replaced {
            download_id,
            filename,
        })
    }
}
