//! `CitizenClient`: the app-facing entry point.
//!
//! Owns the session store and the authenticator and adds the one piece of
//! launch state that isn't the session: whether onboarding was finished.

use citizen_api::ApiClient;
use citizen_protocol::{Credentials, Registration, UserProfile};
use citizen_session::{
    AuthRequest, Authenticator, Route, SessionStore, initial_route,
};
use citizen_storage::{DurableStorage, FileStorage};

use crate::{CitizenConfig, CitizenError};

/// Storage key for the onboarding flag. Kept apart from the two session
/// keys, which only `SessionStore` writes.
pub const ONBOARDING_KEY: &str = "onboardingComplete";

/// The client core: session + backend, ready for a UI to drive.
pub struct CitizenClient<S: DurableStorage, A: Authenticator> {
    session: SessionStore<S>,
    auth: A,
}

impl CitizenClient<FileStorage, ApiClient> {
    /// Builds a file-backed client talking to the configured backend.
    ///
    /// # Errors
    /// [`CitizenError::Api`] if the HTTP client can't be built.
    pub fn from_config(config: &CitizenConfig) -> Result<Self, CitizenError> {
        let api = ApiClient::new(&config.api)?;
        let storage = FileStorage::new(&config.storage_path);
        tracing::debug!(
            api = %api.base_url(),
            storage = %config.storage_path.display(),
            "client configured"
        );
        Ok(Self::new(SessionStore::new(storage, config.session.clone()), api))
    }
}

impl<S: DurableStorage, A: Authenticator> CitizenClient<S, A> {
    /// Wraps an existing session store and authenticator.
    pub fn new(session: SessionStore<S>, auth: A) -> Self {
        Self { session, auth }
    }

    /// Restores the session and picks the first screen.
    ///
    /// Call once at startup. Never fails: unreadable storage means
    /// logged out and not onboarded.
    pub async fn bootstrap(&self) -> Route {
        let snapshot = self.session.restore().await;
        let onboarded = self.onboarding_complete().await;
        let route = initial_route(&snapshot, onboarded);
        tracing::info!(%route, onboarded, "bootstrap complete");
        route
    }

    /// Whether the intro slides were finished on this device.
    pub async fn onboarding_complete(&self) -> bool {
        match self.session.storage().get(ONBOARDING_KEY).await {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read onboarding flag");
                false
            }
        }
    }

    /// Records that onboarding was finished.
    ///
    /// # Errors
    /// [`CitizenError::Storage`] if the flag couldn't be written.
    pub async fn complete_onboarding(&self) -> Result<(), CitizenError> {
        self.session.storage().set(ONBOARDING_KEY, "true").await?;
        tracing::info!("onboarding complete");
        Ok(())
    }

    /// Logs in with email and password.
    ///
    /// # Errors
    /// [`CitizenError::Session`]: `AuthFailed` with a user-facing message,
    /// or `Persistence`, in which case the user IS logged in for this run
    /// (check [`CitizenError::is_persistence`]).
    pub async fn sign_in(&self, credentials: Credentials) -> Result<UserProfile, CitizenError> {
        let request = AuthRequest::Login(credentials);
        Ok(self.session.sign_in(&self.auth, &request).await?)
    }

    /// Creates an account and logs in.
    ///
    /// # Errors
    /// Same as [`sign_in`](Self::sign_in).
    pub async fn register(&self, registration: Registration) -> Result<UserProfile, CitizenError> {
        let request = AuthRequest::Register(registration);
        Ok(self.session.sign_in(&self.auth, &request).await?)
    }

    /// Logs out.
    ///
    /// # Errors
    /// [`CitizenError::Session`] with `Persistence` if the stored copy
    /// couldn't be erased. The user is logged out regardless.
    pub async fn sign_out(&self) -> Result<(), CitizenError> {
        Ok(self.session.logout().await?)
    }

    /// The session store, for reading state and subscribing.
    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// The authenticator in use.
    pub fn authenticator(&self) -> &A {
        &self.auth
    }
}
