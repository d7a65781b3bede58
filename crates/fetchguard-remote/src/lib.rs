//! Fetchguard Remote Client
//!
//! reqwest-backed client for the protection service's HTTP+JSON API:
//! config pulls, protect calls, history reports and the connectivity
//! probe.

mod client;
mod error;

pub use client::RemoteClient;
pub use error::RemoteError;

pub type Result<T> = std::result::Result<T, RemoteError>;
