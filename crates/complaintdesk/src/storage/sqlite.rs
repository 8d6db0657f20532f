use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};

use super::KeyValueStorage;
use crate::db::{kv_repo, Database};
use crate::error::StorageError;

/// Key-value storage in the `kv_store` table of a SQLite database.
///
/// All database operations are synchronous and sub-millisecond, so they
/// run inline rather than on a blocking pool.
#[derive(Clone)]
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl KeyValueStorage for SqliteStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(kv_repo::get(&self.db, key)?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        Ok(kv_repo::put(&self.db, key, value, &now)?)
    }
}
