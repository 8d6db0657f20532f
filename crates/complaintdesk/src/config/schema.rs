use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::DEFAULT_COLLECTION_KEY;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: String,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            storage: StorageConfig::default(),
            seed: SeedConfig::default(),
            summary: SummaryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Data directory for `file`, database file for `sqlite`. Unused by
    /// `memory`. Defaults under [`super::default_data_dir`].
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_key")]
    pub key: String,
    /// Simulated round trip applied to every load and save.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_key() -> String {
    DEFAULT_COLLECTION_KEY.to_string()
}

fn default_latency_ms() -> u64 {
    500
}

impl StorageConfig {
    /// Where the selected backend keeps its data, with `~` expanded.
    ///
    /// Without a home directory the defaults are relative to the working
    /// directory.
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            return PathBuf::from(crate::secrets::expand_home(path));
        }
        let data_dir = super::default_data_dir()
            .unwrap_or_else(|| PathBuf::from(".complaintdesk").join("data"));
        match self.backend {
            StorageBackend::Sqlite => data_dir.join(crate::db::DATABASE_FILE_NAME),
            StorageBackend::File | StorageBackend::Memory => data_dir,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            key: default_key(),
            latency_ms: default_latency_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Seed the demo complaints when the store is empty at startup.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Direct API key. Prefer `api_key_file` or `api_key_env_var`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_file: Option<String>,
    #[serde(default = "default_api_key_env_var")]
    pub api_key_env_var: Option<String>,
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env_var() -> Option<String> {
    Some("API_KEY".to_string())
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key: None,
            api_key_file: None,
            api_key_env_var: default_api_key_env_var(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level; `RUST_LOG` takes precedence.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}
