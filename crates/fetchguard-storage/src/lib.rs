//! Fetchguard Storage Layer
//!
//! SQLite-based persistence for guard state. The only durable document is
//! the settings blob, kept in a key/value table.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
