//! Interception error types

use thiserror::Error;

/// Error reported by a host download-control primitive.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct HostError(pub String);

/// Error from the protect endpoint call.
#[derive(Error, Debug)]
pub enum ProtectError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("undecodable response body: {0}")]
    Decode(String),
}

/// Error from a cookie lookup.
#[derive(Error, Debug, Clone)]
#[error("cookie lookup failed: {0}")]
pub struct CookieError(pub String);

/// Fatal interception failures. Only the host control primitives surface
/// here; everything upstream of the protect decision is contained at its
/// own boundary.
#[derive(Error, Debug)]
pub enum InterceptError {
    #[error("Failed to pause download {id}: {source}")]
    Pause { id: String, source: HostError },

    #[error("Failed to cancel download {id}: {source}")]
    Cancel { id: String, source: HostError },

    #[error("Replacement for download {id} failed to start: {source}")]
    Start { id: String, source: HostError },
}

impl InterceptError {
    /// Whether the outer guard should still try to resume the original.
    ///
    /// A failed pause or cancel can leave the original paused, so the
    /// safety-net resume applies. A failed start comes after a successful
    /// cancel: the original is gone and a resume would be moot.
    pub fn resume_recoverable(&self) -> bool {
        matches!(
            self,
            InterceptError::Pause { .. } | InterceptError::Cancel { .. }
        )
    }
}
