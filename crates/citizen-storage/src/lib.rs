//! Durable storage abstraction for the Citizen client.
//!
//! Provides the [`DurableStorage`] trait: a string key-value store that
//! survives process restarts, plus two backends.
//!
//! # Feature Flags
//!
//! - `file` (default): JSON-file backend via [`FileStorage`]

mod error;
#[cfg(feature = "file")]
mod file;
mod memory;

pub use error::StorageError;
#[cfg(feature = "file")]
pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::future::Future;

/// A device-local key-value store whose contents survive restarts.
///
/// Every operation may fail. Callers decide what a failure means: the
/// session layer, for instance, treats a failed read as "logged out".
pub trait DurableStorage: Send + Sync + 'static {
    /// Reads the value for `key`, or `None` if it was never written
    /// (or was deleted).
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Removes `key`. Removing a key that isn't there is not an error.
    fn delete(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}
