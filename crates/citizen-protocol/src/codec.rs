//! Codec trait and implementations for serializing/deserializing values.
//!
//! The session layer persists the user profile as a string blob. It does
//! not care HOW the blob is produced, only that something implements
//! [`Codec`]. [`JsonCodec`] is the one the device storage format uses.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` lets a codec live inside long-lived stores
/// that are shared across async tasks.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;

    /// Encodes straight to a `String`.
    ///
    /// Durable storage holds strings, so this is what the session layer
    /// actually calls.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` on serialization failure and
    /// `ProtocolError::InvalidMessage` if the codec produced non-UTF-8.
    fn encode_string<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        let bytes = self.encode(value)?;
        String::from_utf8(bytes)
            .map_err(|e| ProtocolError::InvalidMessage(format!("codec produced non-UTF-8 output: {e}")))
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is the format the device stores `userData` in, so a profile
/// written by one client build can be read back by the next.
///
/// ## Example
///
/// ```rust
/// use citizen_protocol::{Codec, JsonCodec, UserProfile, UserId};
///
/// let codec = JsonCodec;
/// let user = UserProfile {
///     id: UserId::from("u1"),
///     username: "alice".into(),
///     email: "a@x.com".into(),
///     level: 2,
///     points: 50,
/// };
///
/// let blob = codec.encode_string(&user).unwrap();
/// let back: UserProfile = codec.decode(blob.as_bytes()).unwrap();
/// assert_eq!(user, back);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
