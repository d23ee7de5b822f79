//! Durable key-value store backing the persistence adapter.
//!
//! One row per key in `kv_entries`; values are opaque strings (the adapter
//! stores JSON arrays).

use std::path::Path;

use rusqlite::{params, Connection};

use super::sqlite::{open_database, open_memory_database};
use super::PersistenceError;

/// Backend for whole-value reads and writes keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// SQLite-backed key-value store.
pub struct SqliteKvStore {
    conn: Connection,
    quota_bytes: Option<usize>,
}

impl SqliteKvStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        Ok(Self {
            conn: open_database(path)?,
            quota_bytes: None,
        })
    }

    /// Open a throwaway in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        Ok(Self {
            conn: open_memory_database()?,
            quota_bytes: None,
        })
    }

    /// Reject any single value larger than `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Keys currently stored, sorted.
    #[cfg(test)]
    pub fn keys(&self) -> Result<Vec<String>, PersistenceError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_entries ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.map(|r| r.map_err(PersistenceError::from)).collect()
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv_entries WHERE key = ?1")?;
        match stmt.query_row([key], |row| row.get::<_, String>(0)) {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(PersistenceError::from(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if let Some(limit) = self.quota_bytes {
            if value.len() > limit {
                return Err(PersistenceError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    limit,
                });
            }
        }
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_returns_none() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        assert_eq!(store.get("patients").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let mut store = SqliteKvStore::open_in_memory().unwrap();
        store.set("patients", "[]").unwrap();
        assert_eq!(store.get("patients").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn set_overwrites_existing_value() {
        let mut store = SqliteKvStore::open_in_memory().unwrap();
        store.set("doctors", "[1]").unwrap();
        store.set("doctors", "[2]").unwrap();
        assert_eq!(store.get("doctors").unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.keys().unwrap(), vec!["doctors".to_string()]);
    }

    #[test]
    fn quota_rejects_oversize_value() {
        let mut store = SqliteKvStore::open_in_memory().unwrap().with_quota(4);
        let err = store.set("bills", "[1,2,3]").unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::QuotaExceeded { size: 7, limit: 4, .. }
        ));
        assert_eq!(store.get("bills").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinicdesk.db");
        {
            let mut store = SqliteKvStore::open(&path).unwrap();
            store.set("appointments", "[]").unwrap();
        }
        let store = SqliteKvStore::open(&path).unwrap();
        assert_eq!(store.get("appointments").unwrap().as_deref(), Some("[]"));
    }
}
