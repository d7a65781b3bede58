//! Remote configuration refresh
//!
//! A TTL gate bounds the pull rate no matter how many triggers fire: the
//! periodic task and the per-download inline calls all route through
//! [`ConfigSync::maybe_refresh`].

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::Config;
use crate::payload::RemoteConfigPayload;
use crate::store::ConfigStore;

/// Minimum interval between remote configuration pulls.
pub const CONFIG_TTL: Duration = Duration::from_millis(60_000);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("undecodable response body: {0}")]
    Decode(String),
}

/// Remote source of configuration payloads.
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    async fn fetch_config(&self, config: &Config)
        -> std::result::Result<RemoteConfigPayload, FetchError>;
}

/// What a refresh attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Inside the TTL window; nothing was attempted.
    Throttled,
    /// Pulled, merged and persisted a fresh payload.
    Applied,
    /// The pull or the persist failed; the stale configuration is retained.
    Failed,
}

pub struct ConfigSync<F> {
    store: ConfigStore,
    fetcher: F,
    ttl: Duration,
    /// Stamped at the start of every eligible attempt, success or not.
    last_pull: Arc<Mutex<Option<Instant>>>,
}

impl<F: ConfigFetcher> ConfigSync<F> {
    pub fn new(store: ConfigStore, fetcher: F) -> Self {
        Self::with_ttl(store, fetcher, CONFIG_TTL)
    }

    pub fn with_ttl(store: ConfigStore, fetcher: F, ttl: Duration) -> Self {
        Self {
            store,
            fetcher,
            ttl,
            last_pull: Arc::new(Mutex::new(None)),
        }
    }

    /// Refresh the configuration from the service unless a pull was already
    /// attempted within the TTL window.
    ///
    /// The stamp is taken before the network call, so overlapping triggers
    /// cost at most one pull per window and a failed pull does not re-open
    /// the window early. Failures are logged and leave the stale
    /// configuration in place; this never propagates an error.
    pub async fn maybe_refresh(&self) -> RefreshOutcome {
        {
            let mut last_pull = self.last_pull.lock();
            if let Some(at) = *last_pull {
                if at.elapsed() < self.ttl {
                    return RefreshOutcome::Throttled;
                }
            }
            *last_pull = Some(Instant::now());
        }

        let config = self.store.load();
        let payload = match self.fetcher.fetch_config(&config).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Remote config fetch failed: {}", e);
                return RefreshOutcome::Failed;
            }
        };

        match self.store.replace(config.merged_with_remote(&payload)) {
            Ok(_) => {
                tracing::info!("Configuration refreshed from service");
                RefreshOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Failed to persist refreshed configuration: {}", e);
                RefreshOutcome::Failed
            }
        }
    }
}

impl<F: Clone> Clone for ConfigSync<F> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            fetcher: self.fetcher.clone(),
            ttl: self.ttl,
            last_pull: Arc::clone(&self.last_pull),
        }
    }
}
