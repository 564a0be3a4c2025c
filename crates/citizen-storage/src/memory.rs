//! In-process storage backend.
//!
//! [`MemoryStorage`] is a cloneable handle to a shared map. Two handles
//! cloned from the same instance see the same data, which is how tests
//! model "the app restarted but the device kept its storage".

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::{DurableStorage, StorageError};

#[derive(Debug, Default)]
struct Inner {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

/// A [`DurableStorage`] backed by a process-local `HashMap`.
///
/// Supports fault injection: [`fail_reads`](Self::fail_reads) and
/// [`fail_writes`](Self::fail_writes) make subsequent operations return
/// [`StorageError::Unavailable`] until switched off again.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Inner>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `get` fail while `on` is true.
    pub fn fail_reads(&self, on: bool) {
        self.inner.fail_reads.store(on, Ordering::SeqCst);
    }

    /// Makes every `set` and `delete` fail while `on` is true.
    pub fn fail_writes(&self, on: bool) {
        self.inner.fail_writes.store(on, Ordering::SeqCst);
    }

    /// Returns a copy of everything currently stored.
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.inner.entries.lock().await.clone()
    }

    fn check(&self, flag: &AtomicBool, op: &str) -> Result<(), StorageError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("{op} disabled")));
        }
        Ok(())
    }
}

impl DurableStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check(&self.inner.fail_reads, "read")?;
        Ok(self.inner.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(&self.inner.fail_writes, "write")?;
        self.inner
            .entries
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        tracing::debug!(key, "memory storage: set");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.check(&self.inner.fail_writes, "write")?;
        self.inner.entries.lock().await.remove(key);
        tracing::debug!(key, "memory storage: delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("userToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_returns_value() {
        let storage = MemoryStorage::new();
        storage.set("userToken", "tok123").await.unwrap();
        assert_eq!(
            storage.get("userToken").await.unwrap().as_deref(),
            Some("tok123")
        );
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let storage = MemoryStorage::new();
        storage.set("k", "one").await.unwrap();
        storage.set("k", "two").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        storage.delete("never-written").await.expect("should succeed");
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set("k", "v").await.unwrap();
        assert_eq!(b.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_fail_writes_rejects_set_and_delete() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").await.unwrap();
        storage.fail_writes(true);

        assert!(matches!(
            storage.set("k", "w").await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            storage.delete("k").await,
            Err(StorageError::Unavailable(_))
        ));
        // Reads still work and see the old value.
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));

        storage.fail_writes(false);
        storage.delete("k").await.expect("should succeed again");
    }

    #[tokio::test]
    async fn test_fail_reads_rejects_get() {
        let storage = MemoryStorage::new();
        storage.fail_reads(true);
        assert!(storage.get("k").await.is_err());
    }
}
