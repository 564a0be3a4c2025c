//! Core data types shared by every Citizen crate.
//!
//! These are the structures that come back from the remote service and
//! get written to device storage. Field names on the wire are part of the
//! contract: a profile persisted by one build must parse in the next.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A server-assigned user identifier.
///
/// Newtype over `String` so a `UserId` can't be passed where a `RantId`
/// is expected. `#[serde(transparent)]` keeps it a bare string in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Returns `true` if the id is empty (or only whitespace).
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Borrows the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A server-assigned rant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RantId(pub String);

impl From<&str> for RantId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for RantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// UserProfile
// ---------------------------------------------------------------------------

/// Denormalized snapshot of the authenticated user.
///
/// `level` and `points` are gamification counters assigned by the server.
/// They are unsigned, so a stored blob with a negative value fails to
/// decode and is treated like any other corrupt profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub level: u32,
    pub points: u32,
}

impl UserProfile {
    /// Checks the one rule the client relies on: the id is present.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] if `id` is blank.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.id.is_blank() {
            return Err(ProtocolError::InvalidMessage("user id must not be empty".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Authentication payloads
// ---------------------------------------------------------------------------

/// The successful result of logging in or registering: a bearer token
/// plus the profile it belongs to.
///
/// Matches the `{ "token": ..., "user": {...} }` body the service sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub token: String,
    pub user: UserProfile,
}

/// Email + password, as submitted from the login form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Rejects blank fields before anything goes over the network.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] if either field is blank.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        require_filled(&[&self.email, &self.password])
    }
}

/// Passwords stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Username + email + password, as submitted from the register form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// Rejects blank fields before anything goes over the network.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] if any field is blank.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        require_filled(&[&self.username, &self.email, &self.password])
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn require_filled(fields: &[&str]) -> Result<(), ProtocolError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ProtocolError::InvalidMessage("Please fill in all fields.".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Rant
// ---------------------------------------------------------------------------

/// A user-submitted local complaint.
///
/// `created_at` is unix seconds. Older payloads may omit it, in which
/// case it defaults to 0 and sorts as the oldest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rant {
    pub id: RantId,
    pub text: String,
    pub city: String,
    pub upvotes: u32,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
