//! Domain operations over the record store.
//!
//! Every write reads the whole collection, changes it in memory and writes
//! the whole collection back. Writers are serialized by an async mutex so
//! that one read-modify-write finishes before the next one reads.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::info_span;
use tracing::Instrument;

use crate::complaint::{id, Clock, Complaint, ComplaintStatus, NewComplaint, SystemClock};
use crate::error::StorageError;
use crate::storage::RecordStore;

pub mod seed;

pub use seed::default_fixtures;

/// Short-token attempts before falling back to a wide identifier.
const MAX_ID_ATTEMPTS: usize = 8;

/// The authoritative API for complaint state changes.
pub struct ComplaintRepository {
    store: RecordStore,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl ComplaintRepository {
    pub fn new(store: RecordStore) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: RecordStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Returns all complaints, newest first.
    ///
    /// Records with equal `createdAt` keep their stored order.
    pub async fn list(&self) -> Result<Vec<Complaint>, StorageError> {
        let mut complaints = self
            .store
            .load()
            .instrument(info_span!("repository.list"))
            .await?;
        sort_newest_first(&mut complaints);
        Ok(complaints)
    }

    /// Looks up a single complaint.
    pub async fn find(&self, id: &str) -> Result<Option<Complaint>, StorageError> {
        let complaints = self.store.load().await?;
        Ok(complaints.into_iter().find(|c| c.id == id))
    }

    /// Stores a new pending complaint and returns it.
    ///
    /// The fields are stored as given; validation belongs to the caller.
    pub async fn create(&self, fields: NewComplaint) -> Result<Complaint, StorageError> {
        let _guard = self.write_lock.lock().await;
        self.insert(fields)
            .instrument(info_span!("repository.create"))
            .await
    }

    /// Sets the status of the complaint with `id`.
    ///
    /// Returns `Ok(None)` when no such complaint exists; the store is left
    /// untouched in that case.
    pub async fn update_status(
        &self,
        id: &str,
        status: ComplaintStatus,
    ) -> Result<Option<Complaint>, StorageError> {
        let _guard = self.write_lock.lock().await;
        self.write_status(id, status)
            .instrument(info_span!("repository.update_status", id = %id, status = ?status))
            .await
    }

    /// Creates `fixtures` one by one if the store holds no complaints.
    ///
    /// Emptiness is checked once, before the first fixture is written.
    /// Returns how many records were created.
    pub async fn seed_if_empty(&self, fixtures: &[NewComplaint]) -> Result<usize, StorageError> {
        let _guard = self.write_lock.lock().await;

        if !self.store.load().await?.is_empty() {
            log::debug!("Store already holds complaints, skipping seed");
            return Ok(0);
        }

        for fields in fixtures {
            self.insert(fields.clone()).await?;
        }

        log::info!("Seeded {} example complaints", fixtures.len());
        Ok(fixtures.len())
    }

    /// Read-modify-write for a status change. Callers hold the write lock.
    async fn write_status(
        &self,
        id: &str,
        status: ComplaintStatus,
    ) -> Result<Option<Complaint>, StorageError> {
        let mut complaints = self.store.load().await?;
        let Some(index) = complaints.iter().position(|c| c.id == id) else {
            log::debug!("Status update for unknown complaint {}", id);
            return Ok(None);
        };

        let now = self.clock.now();
        let record = &mut complaints[index];
        record.status = status;
        record.updated_at = later_of(now, record.updated_at);
        let updated = record.clone();

        self.store.save(&complaints).await?;
        log::info!("Complaint {} moved to {:?}", updated.id, updated.status);
        Ok(Some(updated))
    }

    /// Read-modify-write for a single create. Callers hold the write lock.
    async fn insert(&self, fields: NewComplaint) -> Result<Complaint, StorageError> {
        let mut complaints = self.store.load().await?;
        let now = self.clock.now();
        let id = unique_id(&complaints, now);

        let complaint = Complaint::from_new(id, fields, now);
        complaints.insert(0, complaint.clone());
        self.store.save(&complaints).await?;

        log::info!(
            "Created complaint {} ({:?})",
            complaint.id,
            complaint.category
        );
        Ok(complaint)
    }
}

/// Orders by `createdAt` descending. Stable, so ties keep stored order.
pub fn sort_newest_first(complaints: &mut [Complaint]) {
    complaints.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn later_of(a: DateTime<Utc>, b: DateTime<Utc>) -> DateTime<Utc> {
    if a >= b {
        a
    } else {
        b
    }
}

fn unique_id(existing: &[Complaint], now: DateTime<Utc>) -> String {
    let taken: HashSet<&str> = existing.iter().map(|c| c.id.as_str()).collect();
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = id::generate(now);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }
    log::warn!("Short complaint ids kept colliding, using a wide id");
    id::generate_wide(now)
}
