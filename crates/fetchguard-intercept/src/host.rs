//! Host download-control seam

use async_trait::async_trait;

use crate::error::HostError;
use crate::event::ConflictPolicy;

/// Download-control primitives provided by the host application.
///
/// The guard drives downloads exclusively through this seam, keyed by the
/// host's own download identifiers; it never holds transfer state itself.
#[async_trait]
pub trait DownloadHost: Send + Sync {
    async fn pause(&self, id: &str) -> Result<(), HostError>;

    async fn resume(&self, id: &str) -> Result<(), HostError>;

    async fn cancel(&self, id: &str) -> Result<(), HostError>;

    /// Start a new download and return the host's identifier for it.
    async fn start(
        &self,
        url: &str,
        filename: Option<&str>,
        conflict: ConflictPolicy,
    ) -> Result<String, HostError>;
}
