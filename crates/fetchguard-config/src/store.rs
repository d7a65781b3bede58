//! Durable configuration store

use parking_lot::RwLock;
use std::sync::Arc;

use fetchguard_storage::Database;

use crate::config::{Config, ConfigPatch};
use crate::Result;

/// Settings table key holding the configuration document.
const SETTINGS_KEY: &str = "guard_config";

pub struct ConfigStore {
    /// In-memory configuration cache
    cache: Arc<RwLock<Config>>,
    /// Database for persistence
    db: Database,
}

impl ConfigStore {
    pub fn new(db: Database) -> Self {
        Self {
            cache: Arc::new(RwLock::new(Config::default())),
            db,
        }
    }

    /// Read the persisted document, fill absent keys from defaults and
    /// refresh the cache. Absent storage is treated as empty; storage or
    /// decode problems fall back to defaults. Loading never fails outward.
    pub fn load(&self) -> Config {
        let loaded = match self.db.get_setting(SETTINGS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Config>(&raw) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Stored configuration is malformed, using defaults: {}", e);
                    Config::default()
                }
            },
            Ok(None) => Config::default(),
            Err(e) => {
                tracing::warn!("Failed to read stored configuration, using defaults: {}", e);
                Config::default()
            }
        };

        *self.cache.write() = loaded.clone();
        loaded
    }

    /// The last fully-merged snapshot.
    pub fn current(&self) -> Config {
        self.cache.read().clone()
    }

    /// Shallow-merge `patch` onto the current configuration and persist the
    /// full result. Subsequent reads see the update immediately.
    pub fn save(&self, patch: ConfigPatch) -> Result<Config> {
        let merged = self.current().apply(patch);
        self.persist(&merged)?;
        *self.cache.write() = merged.clone();

        tracing::debug!("Configuration saved");
        Ok(merged)
    }

    /// Replace the configuration wholesale. Used by the remote sync, which
    /// merges on its own terms before persisting.
    pub fn replace(&self, config: Config) -> Result<Config> {
        self.persist(&config)?;
        *self.cache.write() = config.clone();
        Ok(config)
    }

    fn persist(&self, config: &Config) -> Result<()> {
        let raw = serde_json::to_string(config)?;
        self.db.set_setting(SETTINGS_KEY, &raw)?;
        Ok(())
    }
}

impl Clone for ConfigStore {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            db: self.db.clone(),
        }
    }
}
