//! Test harness for isolated repository and dashboard tests.
//!
//! A `TestHarness` owns a temp directory, a storage medium, a manual clock
//! and a repository wired over them, so tests can inspect the raw stored
//! value next to what the repository reports.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

use complaintdesk::complaint::ManualClock;
use complaintdesk::dashboard::DashboardController;
use complaintdesk::db::Database;
use complaintdesk::storage::{
    FileStorage, KeyValueStorage, MemoryStorage, SqliteStorage, DEFAULT_COLLECTION_KEY,
};
use complaintdesk::{ComplaintRepository, RecordStore, StorageError};

/// Wraps a medium and fails reads or writes on demand.
pub struct FaultyStorage {
    inner: Arc<dyn KeyValueStorage>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FaultyStorage {
    pub fn new(inner: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStorage for FaultyStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("simulated read fault".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("simulated write fault".to_string()));
        }
        self.inner.set(key, value).await
    }
}

/// Isolated environment for integration tests.
pub struct TestHarness {
    /// Keeps file and sqlite media alive for the test's duration.
    temp_dir: TempDir,
    pub storage: Arc<FaultyStorage>,
    pub clock: Arc<ManualClock>,
    pub repository: Arc<ComplaintRepository>,
}

impl TestHarness {
    /// Harness over in-memory storage.
    pub fn memory() -> Self {
        Self::over(|_| Arc::new(MemoryStorage::new()) as Arc<dyn KeyValueStorage>)
    }

    /// Harness over a file-backed medium in a temp directory.
    pub fn file() -> Self {
        Self::over(|dir| Arc::new(FileStorage::new(dir.join("data"))) as Arc<dyn KeyValueStorage>)
    }

    /// Harness over a SQLite database in a temp directory.
    pub fn sqlite() -> Self {
        Self::over(|dir| {
            let db = Database::open(&dir.join("complaintdesk.db")).expect("open database");
            Arc::new(SqliteStorage::new(db)) as Arc<dyn KeyValueStorage>
        })
    }

    fn over<F>(medium: F) -> Self
    where
        F: FnOnce(&std::path::Path) -> Arc<dyn KeyValueStorage>,
    {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = Arc::new(FaultyStorage::new(medium(temp_dir.path())));
        let clock = Arc::new(ManualClock::new(start_time()));
        let store = RecordStore::new(storage.clone());
        let repository = Arc::new(ComplaintRepository::with_clock(store, clock.clone()));

        Self {
            temp_dir,
            storage,
            clock,
            repository,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// A dashboard controller over this harness's repository and clock.
    pub fn dashboard(&self) -> DashboardController {
        DashboardController::new(self.repository.clone(), self.clock.clone())
    }

    /// The raw stored collection value.
    pub async fn raw(&self) -> Option<String> {
        self.storage
            .get(DEFAULT_COLLECTION_KEY)
            .await
            .expect("read raw collection")
    }

    /// Overwrites the raw stored collection value.
    pub async fn write_raw(&self, value: &str) {
        self.storage
            .set(DEFAULT_COLLECTION_KEY, value)
            .await
            .expect("write raw collection");
    }

    pub fn tick(&self, seconds: i64) {
        self.clock.advance(Duration::seconds(seconds));
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap()
}
