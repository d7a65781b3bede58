//! Guard options

use std::path::PathBuf;
use std::time::Duration;

use fetchguard_config::CONFIG_TTL;

/// Interval between periodic refresh ticks.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct GuardOptions {
    /// Path to the settings database file
    pub database_path: PathBuf,
    /// Minimum interval between remote configuration pulls
    pub config_ttl: Duration,
    /// Period of the background refresh task
    pub refresh_period: Duration,
}

impl GuardOptions {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("fetchguard.db"),
            config_ttl: CONFIG_TTL,
            refresh_period: REFRESH_PERIOD,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Fetchguard"))
            .unwrap_or_else(|| PathBuf::from(".fetchguard"))
    }
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for common directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
