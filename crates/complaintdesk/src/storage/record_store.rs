//! The complaint collection stored as one JSON blob under one key.

use std::sync::Arc;

use serde_json::Value;

use super::{KeyValueStorage, Latency};
use crate::complaint::Complaint;
use crate::error::StorageError;

/// Well-known key holding the complaint collection.
pub const DEFAULT_COLLECTION_KEY: &str = "pea_complaints";

/// Durable storage of the whole complaint collection.
///
/// Reading is best-effort: an absent key or a value that is not a JSON
/// array yields an empty collection, and records that cannot be decoded
/// are dropped. Only faults of the underlying medium are returned as
/// errors.
#[derive(Clone)]
pub struct RecordStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    latency: Latency,
}

impl RecordStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            key: DEFAULT_COLLECTION_KEY.to_string(),
            latency: Latency::none(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored collection in stored order.
    pub async fn load(&self) -> Result<Vec<Complaint>, StorageError> {
        self.latency.wait().await;

        let raw = match self.storage.get(&self.key).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        Ok(decode_collection(&raw, &self.key))
    }

    /// Replaces the stored collection with `collection`.
    pub async fn save(&self, collection: &[Complaint]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(collection)?;
        self.latency.wait().await;
        self.storage.set(&self.key, &encoded).await
    }
}

fn decode_collection(raw: &str, key: &str) -> Vec<Complaint> {
    let records = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            log::warn!(
                "Stored value under '{}' is not a collection, starting with an empty one",
                key
            );
            return Vec::new();
        }
        Err(e) => {
            log::warn!(
                "Stored value under '{}' is not valid JSON ({}), starting with an empty one",
                key,
                e
            );
            return Vec::new();
        }
    };

    let total = records.len();
    let complaints: Vec<Complaint> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, mut record)| {
            upgrade_record(&mut record);
            match serde_json::from_value::<Complaint>(record) {
                Ok(complaint) => Some(complaint),
                Err(e) => {
                    log::warn!("Dropping unreadable record #{} under '{}': {}", index, key, e);
                    None
                }
            }
        })
        .collect();

    if complaints.len() != total {
        log::warn!(
            "Recovered {} of {} stored records under '{}'",
            complaints.len(),
            total,
            key
        );
    }

    complaints
}

/// Fills fields that older records may lack.
fn upgrade_record(record: &mut Value) {
    if let Value::Object(fields) = record {
        if !fields.contains_key("updatedAt") {
            if let Some(created_at) = fields.get("createdAt").cloned() {
                fields.insert("updatedAt".to_string(), created_at);
            }
        }
    }
}
