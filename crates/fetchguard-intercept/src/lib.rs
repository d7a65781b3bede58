//! Fetchguard Interception Core
//!
//! Watches host download events and reroutes matching downloads through the
//! protection service: pause the original, ask the service for a protected
//! replacement, then either swap the download out or hand it back untouched.
//! The host's download engine, cookie jar and settings surface all live
//! behind seams; this crate owns only the decision and ordering logic.

mod cookies;
mod error;
mod event;
mod host;
mod interceptor;
mod patterns;
mod protocol;

pub use cookies::{cookie_header, Cookie, CookieSource};
pub use error::{CookieError, HostError, InterceptError, ProtectError};
pub use event::{ConflictPolicy, DownloadEvent};
pub use host::DownloadHost;
pub use interceptor::{InterceptOutcome, Interceptor, ProtectFailure, SkipReason};
pub use patterns::UrlPatterns;
pub use protocol::{HistoryRecord, ProtectRequest, ProtectResponse, ProtectService};

pub type Result<T> = std::result::Result<T, InterceptError>;
