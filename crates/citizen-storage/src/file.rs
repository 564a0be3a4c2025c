//! JSON-file storage backend.
//!
//! The whole store is one JSON object (`{"key": "value", ...}`) on disk.
//! Every mutation rewrites it through a temp file and a rename, so a crash
//! leaves either the old contents or the new ones, never half a file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::{DurableStorage, StorageError};

/// A [`DurableStorage`] that persists to a single JSON file.
///
/// A missing file is an empty store. The parent directory is created on
/// the first write. Reads of a file that doesn't parse fail with
/// [`StorageError::Corrupt`]; writes discard it and start from empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Creates a store backed by `path`. Nothing is touched on disk yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };
        serde_json::from_slice(&raw).map_err(|e| {
            StorageError::Corrupt(format!("{}: {e}", self.path.display()))
        })
    }

    /// Like [`read_map`](Self::read_map), but a corrupt file reads as empty
    /// so the next write replaces it. The flag is set when that happened.
    async fn read_map_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.read_map().await {
            Ok(map) => Ok((map, false)),
            Err(StorageError::Corrupt(detail)) => {
                tracing::warn!(%detail, "file storage: corrupt contents, starting over");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_vec_pretty(map)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl DurableStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let (mut map, _) = self.read_map_for_write().await?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map).await?;
        tracing::debug!(key, path = %self.path.display(), "file storage: set");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let (mut map, discarded) = self.read_map_for_write().await?;
        if map.remove(key).is_none() && !discarded {
            return Ok(());
        }
        self.write_map(&map).await?;
        tracing::debug!(key, path = %self.path.display(), "file storage: delete");
        Ok(())
    }
}
