pub mod app;
pub mod complaint;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod logging;
pub mod repository;
pub mod secrets;
pub mod storage;
pub mod summary;

pub use app::App;
pub use complaint::{Complaint, ComplaintCategory, ComplaintStatus, NewComplaint};
pub use config::{load_config, AppConfig};
pub use dashboard::{DashboardController, DashboardView, StatusChangeOutcome};
pub use error::{ComplaintDeskError, ConfigError, Result, StorageError};
pub use repository::ComplaintRepository;
pub use secrets::{resolve_secret, resolve_secret_optional, SecretError};
pub use storage::{KeyValueStorage, RecordStore};
pub use summary::{GeminiSummarizer, SummaryGenerator};
