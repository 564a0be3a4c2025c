//! Session types: the configuration and the observable state.

use citizen_protocol::UserProfile;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Where the session lives in durable storage.
///
/// The defaults are the key names existing installs already use, so
/// changing them logs every returning user out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Key holding the raw bearer token.
    pub token_key: String,

    /// Key holding the JSON-serialized [`UserProfile`].
    pub user_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: "userToken".to_string(),
            user_key: "userData".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// What consumers see: the session at one point in time.
///
/// `token` and `user` are either both `Some` or both `None`.
/// `is_loading` is `true` from construction until `restore()` finishes,
/// and `false` forever after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub is_loading: bool,
}

impl SessionSnapshot {
    /// The state of a freshly constructed store.
    pub(crate) fn loading() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
        }
    }

    /// Returns `true` if a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Value for an `Authorization` header, if logged in.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_deref().map(|t| format!("Bearer {t}"))
    }
}
