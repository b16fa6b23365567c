//! Persistent key-value store adapters.
//!
//! # Responsibility
//! - Define the asynchronous get/set contract the registry persists through.
//! - Provide a SQLite-backed adapter and an in-memory adapter.
//!
//! # Invariants
//! - A value is written and read as one opaque blob; partial writes are
//!   never exposed through this contract.
//! - Adapters never retry; failures are returned to the caller.

use crate::db::DbError;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory_store;
pub mod sqlite_store;

pub use memory_store::MemoryKeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure reported by a key-value adapter.
#[derive(Debug)]
pub enum StoreError {
    /// Reading `key` failed.
    Read { key: String, message: String },
    /// Writing `key` failed.
    Write { key: String, message: String },
    /// Backing database could not be opened or migrated.
    Db(DbError),
}

impl StoreError {
    pub(crate) fn read(key: &str, err: impl Display) -> Self {
        Self::Read {
            key: key.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn write(key: &str, err: impl Display) -> Self {
        Self::Write {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { key, message } => write!(f, "failed to read `{key}`: {message}"),
            Self::Write { key, message } => write!(f, "failed to write `{key}`: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Read { .. } | Self::Write { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Asynchronous string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the blob stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous blob.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}
