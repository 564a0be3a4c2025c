//! Authentication hook for trading credentials for a session.
//!
//! The session layer doesn't talk to the network. It defines the
//! [`Authenticator`] trait (a single async method that turns an
//! [`AuthRequest`] into an [`AuthGrant`]) and whoever builds the app plugs
//! in an implementation: the HTTP client in production, a canned one in
//! tests.

use std::future::Future;

use citizen_protocol::{AuthGrant, Credentials, Registration};

use crate::SessionError;

/// What the user submitted: an existing account or a new one.
///
/// Both end the same way (a token and a profile), which is why they
/// share one trait method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    /// Log in to an existing account.
    Login(Credentials),
    /// Create an account and log straight in.
    Register(Registration),
}

impl AuthRequest {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Register(_) => "register",
        }
    }
}

/// Exchanges credentials for a bearer token and profile.
///
/// # Example
///
/// ```rust
/// use citizen_protocol::{AuthGrant, UserId, UserProfile};
/// use citizen_session::{AuthRequest, Authenticator, SessionError};
///
/// /// Logs everyone in as the same demo user.
/// struct DemoAuthenticator;
///
/// impl Authenticator for DemoAuthenticator {
///     async fn authenticate(
///         &self,
///         _request: &AuthRequest,
///     ) -> Result<AuthGrant, SessionError> {
///         Ok(AuthGrant {
///             token: "demo-token".into(),
///             user: UserProfile {
///                 id: UserId::from("demo"),
///                 username: "demo".into(),
///                 email: "demo@example.com".into(),
///                 level: 0,
///                 points: 0,
///             },
///         })
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Validates the request with the remote service.
    ///
    /// # Returns
    /// - `Ok(AuthGrant)`: here's the token and who it belongs to
    /// - `Err(SessionError::AuthFailed)`: rejected or unreachable
    fn authenticate(
        &self,
        request: &AuthRequest,
    ) -> impl Future<Output = Result<AuthGrant, SessionError>> + Send;
}
