//! The session store: who is logged in, in memory and on disk.
//!
//! `SessionStore` is the only thing allowed to write the token and user
//! keys. It is constructed explicitly and handed to whatever needs it;
//! there is no global.
//!
//! # Ordering
//!
//! `login` and `logout` change the in-memory state first and publish it
//! to subscribers, THEN touch storage. The UI can move on immediately;
//! the call only returns once the durable write has finished (or failed).
//!
//! # Concurrency note
//!
//! There is no internal lock around auth transitions. `login`, `logout`
//! and `refresh_user` must not overlap each other; the caller serializes
//! them (in the app, a disabled button while a request is in flight).

use citizen_protocol::{Codec, JsonCodec, UserProfile};
use citizen_storage::DurableStorage;
use tokio::sync::watch;

use crate::{
    AuthRequest, Authenticator, PersistenceError, SessionConfig, SessionError,
    SessionSnapshot,
};

/// Owns the current session and its durable mirror.
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ [loading] ──restore()──→ [logged out] ──login()──→ [logged in]
///                            │              ↑                      │
///                            └──(stored)──→ [logged in] ──logout()─┘
/// ```
pub struct SessionStore<S: DurableStorage> {
    storage: S,
    config: SessionConfig,
    codec: JsonCodec,
    /// Current state. Subscribers hold receivers for this channel.
    state: watch::Sender<SessionSnapshot>,
}

impl<S: DurableStorage> SessionStore<S> {
    /// Creates a store in the loading state. Call [`restore`](Self::restore)
    /// before showing anything that depends on auth.
    pub fn new(storage: S, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::loading());
        Self {
            storage,
            config,
            codec: JsonCodec,
            state,
        }
    }

    /// Loads the persisted session, if there is a usable one.
    ///
    /// Missing keys, unreadable storage, and a profile blob that doesn't
    /// parse all end the same way: logged out, with a warning in the log.
    /// Nothing is ever written. `is_loading` becomes `false` no matter what.
    ///
    /// Only the first call does anything; later calls return the current
    /// snapshot.
    pub async fn restore(&self) -> SessionSnapshot {
        if !self.state.borrow().is_loading {
            tracing::debug!("restore called after startup, ignoring");
            return self.snapshot();
        }

        let persisted = self.read_persisted().await;

        self.state.send_modify(|s| {
            // A login that raced ahead of restore wins over what's on disk.
            if !s.is_authenticated() {
                match persisted {
                    Some((token, user)) => {
                        s.token = Some(token);
                        s.user = Some(user);
                    }
                    None => {
                        s.token = None;
                        s.user = None;
                    }
                }
            }
            s.is_loading = false;
        });

        let snap = self.snapshot();
        match &snap.user {
            Some(user) => tracing::info!(user_id = %user.id, "session restored"),
            None => tracing::info!("no stored session, starting logged out"),
        }
        snap
    }

    /// Reads both keys. `None` unless both are present and usable.
    async fn read_persisted(&self) -> Option<(String, UserProfile)> {
        let token = match self.storage.get(&self.config.token_key).await {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!(error = %e, key = %self.config.token_key, "could not read stored token");
                return None;
            }
        };

        let blob = match self.storage.get(&self.config.user_key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::warn!("stored token has no profile, discarding");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, key = %self.config.user_key, "could not read stored profile");
                return None;
            }
        };

        let user: UserProfile = match self.codec.decode(blob.as_bytes()) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "stored profile is corrupt, discarding");
                return None;
            }
        };
        if user.validate().is_err() {
            tracing::warn!("stored profile has no id, discarding");
            return None;
        }

        Some((token, user))
    }

    /// Starts a session with a server-issued token and profile.
    ///
    /// The new state is visible to subscribers before the durable write
    /// begins. Do not call `logout` or `login` again until this returns.
    ///
    /// # Errors
    /// - [`SessionError::InvalidCredentials`]: empty token or user id;
    ///   nothing changed, no I/O attempted
    /// - [`SessionError::Persistence`]: the write failed; the session is
    ///   still live in memory for this process
    pub async fn login(
        &self,
        token: impl Into<String>,
        user: UserProfile,
    ) -> Result<(), SessionError> {
        let token = token.into();
        if token.is_empty() {
            return Err(SessionError::InvalidCredentials("token must not be empty".into()));
        }
        if user.id.is_blank() {
            return Err(SessionError::InvalidCredentials("user id must not be empty".into()));
        }

        let user_id = user.id.clone();
        self.state.send_modify(|s| {
            s.token = Some(token.clone());
            s.user = Some(user.clone());
        });
        tracing::info!(%user_id, "session started");

        self.persist(&token, &user).await.map_err(|e| {
            tracing::warn!(%user_id, error = %e, "session not persisted, memory-only for this run");
            SessionError::from(e)
        })
    }

    async fn persist(&self, token: &str, user: &UserProfile) -> Result<(), PersistenceError> {
        let blob = self.codec.encode_string(user)?;
        self.storage.set(&self.config.token_key, token).await?;
        self.storage.set(&self.config.user_key, &blob).await?;
        Ok(())
    }

    /// Ends the session and erases the stored copy.
    ///
    /// Safe to call when already logged out. Both keys are deleted even if
    /// the first delete fails.
    ///
    /// # Errors
    /// [`SessionError::Persistence`] if a delete failed. The user is logged
    /// out regardless; stale bytes left on disk are discarded by the next
    /// `restore` if they don't form a complete session.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let was_logged_in = self.state.send_if_modified(|s| {
            if s.token.is_none() && s.user.is_none() {
                return false;
            }
            s.token = None;
            s.user = None;
            true
        });
        if was_logged_in {
            tracing::info!("session ended");
        }

        let token_res = self.storage.delete(&self.config.token_key).await;
        let user_res = self.storage.delete(&self.config.user_key).await;

        token_res.and(user_res).map_err(|e| {
            tracing::warn!(error = %e, "stored session not erased");
            SessionError::from(PersistenceError::from(e))
        })
    }

    /// Replaces the profile of the active session (new points, new level)
    /// and persists it. The token is untouched.
    ///
    /// # Errors
    /// - [`SessionError::InvalidCredentials`]: the profile has no id, or
    ///   belongs to a different user than the active session
    /// - [`SessionError::NotLoggedIn`]: there's no session to update
    /// - [`SessionError::Persistence`]: the in-memory profile changed,
    ///   the stored one didn't
    pub async fn refresh_user(&self, user: UserProfile) -> Result<(), SessionError> {
        if user.id.is_blank() {
            return Err(SessionError::InvalidCredentials("user id must not be empty".into()));
        }

        let mut outcome = Err(SessionError::NotLoggedIn);
        self.state.send_if_modified(|s| {
            if s.token.is_none() {
                return false;
            }
            if s.user.as_ref().is_some_and(|current| current.id != user.id) {
                outcome = Err(SessionError::InvalidCredentials(
                    "profile belongs to a different user".into(),
                ));
                return false;
            }
            s.user = Some(user.clone());
            outcome = Ok(());
            true
        });
        outcome?;
        tracing::debug!(user_id = %user.id, points = user.points, level = user.level, "profile refreshed");

        let blob = self
            .codec
            .encode_string(&user)
            .map_err(PersistenceError::from)?;
        self.storage
            .set(&self.config.user_key, &blob)
            .await
            .map_err(PersistenceError::from)?;
        Ok(())
    }

    /// Authenticates with the remote service, then calls [`login`](Self::login).
    ///
    /// Returns the profile of the new session.
    ///
    /// # Errors
    /// Whatever the authenticator or `login` returns. On
    /// [`SessionError::Persistence`] the user IS logged in for this run.
    pub async fn sign_in<A: Authenticator>(
        &self,
        auth: &A,
        request: &AuthRequest,
    ) -> Result<UserProfile, SessionError> {
        tracing::debug!(kind = request.kind(), "authenticating");
        let grant = auth.authenticate(request).await?;
        let user = grant.user.clone();
        self.login(grant.token, grant.user).await?;
        Ok(user)
    }

    /// The current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// A receiver that sees every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// `true` until `restore` has finished.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// `true` if a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// The current bearer token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    /// The current profile, if logged in.
    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    /// The storage this store persists to.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The key layout in use.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

// =========================================================================
// Tests
// =========================================================================
