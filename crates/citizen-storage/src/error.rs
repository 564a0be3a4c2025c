/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing medium holds bytes this backend can't interpret.
    #[error("storage is corrupt: {0}")]
    Corrupt(String),

    /// The backend refused the operation (quota, read-only, injected fault).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
