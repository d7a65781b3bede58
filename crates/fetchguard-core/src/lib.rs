//! Fetchguard Core
//!
//! Central wiring for the download protection guard. The host application
//! feeds download events in and provides the control and cookie seams;
//! the guard owns configuration, policy and the interception state
//! machine.

mod error;
mod guard;
mod options;

pub use error::CoreError;
pub use guard::Guard;
pub use options::{GuardOptions, REFRESH_PERIOD};

// Re-export core components
pub use fetchguard_config::{
    Config, ConfigFetcher, ConfigPatch, ConfigStore, ConfigSync, FetchError, RefreshOutcome,
    RemoteConfigPayload, CONFIG_TTL,
};
pub use fetchguard_intercept::{
    cookie_header, ConflictPolicy, Cookie, CookieError, CookieSource, DownloadEvent, DownloadHost,
    HistoryRecord, HostError, InterceptError, InterceptOutcome, Interceptor, ProtectError,
    ProtectFailure, ProtectRequest, ProtectResponse, ProtectService, SkipReason, UrlPatterns,
};
pub use fetchguard_remote::{RemoteClient, RemoteError};
pub use fetchguard_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
