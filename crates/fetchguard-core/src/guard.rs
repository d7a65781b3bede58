//! Main guard wiring
//!
//! Central state container: storage, configuration, remote client and the
//! interception state machine, plus the periodic refresh task.

use std::time::Duration;

use fetchguard_config::{ConfigStore, ConfigSync, RefreshOutcome};
use fetchguard_intercept::{
    CookieSource, DownloadEvent, DownloadHost, InterceptOutcome, Interceptor,
};
use fetchguard_remote::RemoteClient;
use fetchguard_storage::Database;

use crate::options::GuardOptions;
use crate::Result;

pub struct Guard<H, C> {
    config_store: ConfigStore,
    sync: ConfigSync<RemoteClient>,
    remote: RemoteClient,
    interceptor: Interceptor<H, C, RemoteClient>,
    refresh_period: Duration,
}

impl<H, C> Guard<H, C>
where
    H: DownloadHost,
    C: CookieSource,
{
    /// Wire up a guard over the host's download-control and cookie seams.
    pub fn new(options: GuardOptions, host: H, cookies: C) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = options.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&options.database_path)?;
        let config_store = ConfigStore::new(db);
        config_store.load();

        let remote = RemoteClient::new()?;
        let sync = ConfigSync::with_ttl(config_store.clone(), remote.clone(), options.config_ttl);
        let interceptor = Interceptor::new(
            config_store.clone(),
            sync.clone(),
            remote.clone(),
            host,
            cookies,
        );

        Ok(Self {
            config_store,
            sync,
            remote,
            interceptor,
            refresh_period: options.refresh_period,
        })
    }

    /// Load persisted settings and attempt a first remote refresh.
    /// Refresh failures are contained; initialization does not fail on
    /// them.
    pub async fn initialize(&self) -> RefreshOutcome {
        self.config_store.load();
        let outcome = self.sync.maybe_refresh().await;

        tracing::info!(?outcome, "Guard initialized");
        outcome
    }

    /// Run the interception state machine for one observed download.
    pub async fn on_download(&self, event: &DownloadEvent) -> Result<InterceptOutcome> {
        Ok(self.interceptor.handle(event).await?)
    }

    /// Keep the configuration warm: a detached task driving the refresh
    /// gate once per period. Abort the handle to stop it.
    pub fn spawn_config_refresh(&self) -> tokio::task::JoinHandle<()> {
        let sync = self.sync.clone();
        let period = self.refresh_period;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick completes immediately; the gate below decides
            // whether anything is actually pulled.
            loop {
                ticker.tick().await;
                sync.maybe_refresh().await;
            }
        })
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.config_store
    }

    /// The service client, for settings surfaces (connectivity probe).
    pub fn remote(&self) -> &RemoteClient {
        &self.remote
    }
}
