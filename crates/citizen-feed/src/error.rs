//! Error types for the feed.

use citizen_protocol::RantId;

/// Errors that can occur during feed operations.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// No rant with this id is loaded.
    #[error("rant {0} not found")]
    NotFound(RantId),

    /// A rant with this id is already loaded.
    #[error("rant {0} already in feed")]
    Duplicate(RantId),

    /// The rant being posted breaks a rule (empty text, too long, no city).
    #[error("invalid rant: {0}")]
    InvalidRant(String),
}
