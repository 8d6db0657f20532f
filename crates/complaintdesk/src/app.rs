//! Application wiring: storage medium, repository, dashboard and summary
//! service built from one configuration.

use std::sync::Arc;

use crate::complaint::{Clock, SystemClock};
use crate::config::{AppConfig, StorageBackend, StorageConfig};
use crate::dashboard::DashboardController;
use crate::db::Database;
use crate::error::Result;
use crate::repository::{default_fixtures, ComplaintRepository};
use crate::storage::{
    FileStorage, KeyValueStorage, Latency, MemoryStorage, RecordStore, SqliteStorage,
};
use crate::summary::{GeminiSummarizer, SummaryGenerator};

/// A fully wired application.
pub struct App {
    config: AppConfig,
    repository: Arc<ComplaintRepository>,
    dashboard: DashboardController,
    summarizer: Arc<dyn SummaryGenerator>,
}

impl App {
    /// Builds the application and, when enabled, seeds the demo complaints
    /// into an empty store.
    pub async fn bootstrap(config: AppConfig) -> Result<Self> {
        let storage = open_storage(&config.storage)?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let summarizer: Arc<dyn SummaryGenerator> =
            Arc::new(GeminiSummarizer::from_config(&config.summary)?);
        Self::assemble(config, storage, clock, summarizer).await
    }

    /// Builds the application over an already opened medium.
    pub async fn assemble(
        config: AppConfig,
        storage: Arc<dyn KeyValueStorage>,
        clock: Arc<dyn Clock>,
        summarizer: Arc<dyn SummaryGenerator>,
    ) -> Result<Self> {
        let store = RecordStore::new(storage)
            .with_key(config.storage.key.clone())
            .with_latency(Latency::from_millis(config.storage.latency_ms));
        let repository = Arc::new(ComplaintRepository::with_clock(store, Arc::clone(&clock)));

        if config.seed.enabled {
            repository.seed_if_empty(&default_fixtures()).await?;
        }

        let dashboard = DashboardController::new(repository.clone(), clock);

        Ok(Self {
            config,
            repository,
            dashboard,
            summarizer,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn repository(&self) -> &ComplaintRepository {
        &self.repository
    }

    pub fn dashboard(&self) -> &DashboardController {
        &self.dashboard
    }

    pub fn summarizer(&self) -> &dyn SummaryGenerator {
        self.summarizer.as_ref()
    }
}

/// Opens the medium selected by the storage config.
pub fn open_storage(config: &StorageConfig) -> Result<Arc<dyn KeyValueStorage>> {
    let storage: Arc<dyn KeyValueStorage> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File => {
            let directory = config.resolved_path();
            log::debug!("Using file storage in {}", directory.display());
            Arc::new(FileStorage::new(directory))
        }
        StorageBackend::Sqlite => {
            let db = Database::open(&config.resolved_path())?;
            Arc::new(SqliteStorage::new(db))
        }
    };
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complaint::{Complaint, ComplaintCategory};
    use async_trait::async_trait;

    struct FixedSummary;

    #[async_trait]
    impl SummaryGenerator for FixedSummary {
        async fn generate_summary(&self, _complaint: &Complaint) -> String {
            "ok".to_string()
        }
    }

    fn memory_config(seed: bool) -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.storage.latency_ms = 0;
        config.seed.enabled = seed;
        config
    }

    #[tokio::test]
    async fn test_bootstrap_seeds_demo_complaints() {
        let app = App::assemble(
            memory_config(true),
            Arc::new(MemoryStorage::new()),
            Arc::new(SystemClock),
            Arc::new(FixedSummary),
        )
        .await
        .unwrap();

        let complaints = app.repository().list().await.unwrap();
        assert_eq!(complaints.len(), 3);
        assert_eq!(complaints[0].category, ComplaintCategory::Billing);
    }

    #[tokio::test]
    async fn test_seeding_can_be_disabled() {
        let app = App::assemble(
            memory_config(false),
            Arc::new(MemoryStorage::new()),
            Arc::new(SystemClock),
            Arc::new(FixedSummary),
        )
        .await
        .unwrap();

        assert!(app.repository().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_backend_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = memory_config(true);
        config.storage.backend = StorageBackend::Sqlite;
        config.storage.path = Some(dir.path().join("desk.db").to_string_lossy().into_owned());

        let first = App::assemble(
            config.clone(),
            open_storage(&config.storage).unwrap(),
            Arc::new(SystemClock),
            Arc::new(FixedSummary),
        )
        .await
        .unwrap();
        let ids: Vec<String> = first
            .repository()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        drop(first);

        let second = App::assemble(
            config.clone(),
            open_storage(&config.storage).unwrap(),
            Arc::new(SystemClock),
            Arc::new(FixedSummary),
        )
        .await
        .unwrap();
        let again: Vec<String> = second
            .repository()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, again);
    }

    #[tokio::test]
    async fn test_file_backend_uses_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = memory_config(false);
        config.storage.backend = StorageBackend::File;
        config.storage.path = Some(dir.path().to_string_lossy().into_owned());

        let app = App::assemble(
            config.clone(),
            open_storage(&config.storage).unwrap(),
            Arc::new(SystemClock),
            Arc::new(FixedSummary),
        )
        .await
        .unwrap();
        app.repository()
            .seed_if_empty(&default_fixtures())
            .await
            .unwrap();

        assert!(dir.path().join("pea_complaints.json").exists());
    }
}
