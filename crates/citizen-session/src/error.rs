//! Error types for the session layer.

use citizen_protocol::ProtocolError;
use citizen_storage::StorageError;

/// A durable read, write, or delete of session data failed.
///
/// When this comes back from `login` or `logout`, the in-memory session
/// has already changed. The user is logged in (or out) for the rest of
/// this process; only the on-disk copy is stale.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The profile couldn't be turned into a storable string.
    #[error(transparent)]
    Serialization(#[from] ProtocolError),
}

/// Errors that can occur during session management.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// See [`PersistenceError`]. The in-memory session is still authoritative.
    #[error("session persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    /// `login` was handed an empty token or a profile with no id.
    /// Nothing was changed and no storage I/O was attempted.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The operation needs an active session and there isn't one.
    #[error("no user is logged in")]
    NotLoggedIn,

    /// The remote service rejected the credentials, or couldn't be reached.
    /// The message is suitable for showing to the user.
    #[error("authentication failed: {0}")]
    AuthFailed(String),
}

impl SessionError {
    /// Returns `true` for failures that leave the in-memory session
    /// changed and only the durable copy behind.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}
