//! In-memory key-value adapter.
//!
//! Used for ephemeral sessions and tests. Clones share the same entries, so
//! a test can keep a handle while the registry owns another.

use super::{KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

/// Shared in-memory store with switchable failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    inner: Arc<Inner>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.entries.lock().insert(key.into(), value.into());
        store
    }

    /// Makes every subsequent `get` fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `set` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `set` calls attempted, failed ones included.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Synchronous peek at a stored value.
    pub fn entry(&self, key: &str) -> Option<String> {
        self.inner.entries.lock().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::read(key, "injected read failure"));
        }
        Ok(self.entry(key))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write(key, "injected write failure"));
        }
        self.inner
            .entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
