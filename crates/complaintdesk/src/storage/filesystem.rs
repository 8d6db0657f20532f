use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::KeyValueStorage;
use crate::error::StorageError;

/// Stores each key as a JSON file inside a directory.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the target, so readers never observe a partial value.
pub struct FileStorage {
    directory: PathBuf,
}

/// Whether `key` can name a file as-is: ASCII letters, digits, `-` and `_`.
///
/// Keys are never rewritten, so two distinct keys never share a file.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.directory.join(format!("{}.json", key)))
    }

    async fn ensure_directory(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| StorageError::CreateDirectory {
                path: self.directory.clone(),
                source: e,
            })
    }

    async fn write_atomically(&self, target: &Path, content: &[u8]) -> Result<(), StorageError> {
        self.ensure_directory().await?;

        let temp_path = self
            .directory
            .join(format!(".{}.tmp", Uuid::new_v4().simple()));

        if let Err(e) = write_synced(&temp_path, content).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::WriteFile {
                path: temp_path,
                source: e,
            });
        }

        if let Err(e) = tokio::fs::rename(&temp_path, target).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::WriteFile {
                path: target.to_path_buf(),
                source: e,
            });
        }
        Ok(())
    }
}

async fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(content).await?;
    file.sync_all().await
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::ReadFile { path, source: e }),
        };

        match String::from_utf8(bytes) {
            Ok(content) => Ok(Some(content)),
            Err(e) => {
                // Undecodable content is left to the record store's recovery.
                log::warn!("{} is not valid UTF-8, reading it lossily", path.display());
                Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        self.write_atomically(&path, value.as_bytes()).await
    }
}
