//! SQLite-backed key-value adapter.
//!
//! # Invariants
//! - One connection per store, guarded by a mutex.
//! - Blocking SQLite calls run on the blocking thread pool, never on the
//!   async scheduler.

use super::{KeyValueStore, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

/// Key-value store persisted in the `kv_entries` table.
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKeyValueStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection that already has migrations applied.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = Arc::clone(&self.conn);
        let owned_key = key.to_string();
        let value = tokio::task::spawn_blocking(move || {
            conn.lock()
                .query_row(
                    "SELECT value FROM kv_entries WHERE key = ?1;",
                    [owned_key.as_str()],
                    |row| row.get::<_, String>(0),
                )
                .optional()
        })
        .await
        .map_err(|err| StoreError::read(key, err))?
        .map_err(|err| StoreError::read(key, err))?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = Arc::clone(&self.conn);
        let owned_key = key.to_string();
        let owned_value = value.to_string();
        tokio::task::spawn_blocking(move || {
            conn.lock().execute(
                "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![owned_key, owned_value],
            )
        })
        .await
        .map_err(|err| StoreError::write(key, err))?
        .map_err(|err| StoreError::write(key, err))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKeyValueStore;
    use crate::store::KeyValueStore;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let store = SqliteKeyValueStore::open_in_memory().expect("in-memory store should open");
        assert_eq!(store.get("@pets").await.expect("read should succeed"), None);
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = SqliteKeyValueStore::open_in_memory().expect("in-memory store should open");
        store.set("@pets", "[]").await.expect("first write");
        store.set("@pets", "[{}]").await.expect("second write");

        let value = store.get("@pets").await.expect("read should succeed");
        assert_eq!(value.as_deref(), Some("[{}]"));
    }
}
