//! Fetchguard Configuration
//!
//! Owns the merged configuration snapshot: durable storage underneath,
//! defaults filling any gap, and a TTL-gated remote refresh on top.
//! Readers always see the last fully-merged write; the snapshot is never
//! partially populated.

mod config;
mod error;
mod payload;
mod store;
mod sync;

pub use config::{Config, ConfigPatch, DEFAULT_RENAME_SUFFIX, DEFAULT_SERVICE_BASE_URL};
pub use error::ConfigError;
pub use payload::RemoteConfigPayload;
pub use store::ConfigStore;
pub use sync::{ConfigFetcher, ConfigSync, FetchError, RefreshOutcome, CONFIG_TTL};

pub type Result<T> = std::result::Result<T, ConfigError>;
