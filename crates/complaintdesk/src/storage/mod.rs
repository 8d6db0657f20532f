//! Storage media and the complaint record store.
//!
//! A medium only knows how to get and set a string under a key. The
//! [`RecordStore`] layers the collection-blob contract on top.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::StorageError;

pub mod filesystem;
pub mod latency;
pub mod record_store;
pub mod sqlite;

pub use filesystem::FileStorage;
pub use latency::Latency;
pub use record_store::{RecordStore, DEFAULT_COLLECTION_KEY};
pub use sqlite::SqliteStorage;

/// A persistence medium with get/set semantics.
///
/// `set` must replace the prior value atomically: a concurrent or later
/// `get` sees either the old value or the new one, never a mix.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
