//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] fetchguard_storage::StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] fetchguard_config::ConfigError),

    #[error("Interception error: {0}")]
    Intercept(#[from] fetchguard_intercept::InterceptError),

    #[error("Remote client error: {0}")]
    Remote(#[from] fetchguard_remote::RemoteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
