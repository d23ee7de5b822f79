pub mod kv;
pub mod sqlite;

pub use kv::*;
pub use sqlite::*;

use thiserror::Error;

/// Failures of the durable key-value store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON encoding failed for key {key}: {source}")]
    Encoding {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Write rejected for key {key}: {size} bytes exceeds quota of {limit} bytes")]
    QuotaExceeded { key: String, size: usize, limit: usize },

    #[error("Cannot prepare storage location: {0}")]
    Io(#[from] std::io::Error),
}
