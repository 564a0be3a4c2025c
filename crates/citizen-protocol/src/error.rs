//! Error types for the protocol layer.
//!
//! Each Citizen crate defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in serialization or in the
//! shape of a value, not in storage or networking.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields,
    /// negative numbers where counters are expected.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The value deserialized fine but breaks a rule: an empty user id,
    /// a blank form field, a rant with no text.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
