pub mod loader;
pub mod schema;

use std::path::PathBuf;

pub use loader::{load_config, load_config_from_str, load_or_default};
pub use schema::{
    AppConfig, LoggingConfig, SeedConfig, StorageBackend, StorageConfig, SummaryConfig,
};

/// Directory holding local data when the config names none:
/// `~/.complaintdesk/data`.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".complaintdesk").join("data"))
}
