//! Unified error type for the Citizen client.

use citizen_api::ApiError;
use citizen_feed::FeedError;
use citizen_protocol::ProtocolError;
use citizen_session::SessionError;
use citizen_storage::StorageError;

use crate::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum CitizenError {
    /// Bad environment configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A storage-level error outside the session keys (onboarding flag).
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A protocol-level error (encode, decode, validation).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (persistence, auth, not logged in).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A feed error (unknown rant, invalid post).
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// A backend API error.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CitizenError {
    /// `true` when the session changed in memory but not on disk.
    /// The UI should carry on as if the operation succeeded.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Session(e) if e.is_persistence())
    }
}
