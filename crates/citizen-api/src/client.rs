//! `ApiClient`: typed calls to the backend over `reqwest`.

use std::time::Duration;

use citizen_protocol::{AuthGrant, Credentials, Rant, Registration};
use citizen_session::{AuthRequest, Authenticator, SessionError};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{ApiError, GENERIC_ERROR_MESSAGE};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme + host (+ port), no trailing slash.
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct UsernameAvailability {
    available: bool,
}

/// Client for the Citizen backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client with the configured timeouts.
    ///
    /// # Errors
    /// [`ApiError::HttpClientBuild`] if `reqwest` can't set up its client.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests go to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /api/users/login`.
    ///
    /// # Errors
    /// [`ApiError::Invalid`] for blank fields (nothing is sent), otherwise
    /// see [`ApiError`].
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, ApiError> {
        credentials.validate()?;
        tracing::debug!(email = %credentials.email, "logging in");
        let response = self
            .http
            .post(self.url("/api/users/login"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_json(response).await
    }

    /// `POST /api/auth/register`.
    ///
    /// # Errors
    /// [`ApiError::Invalid`] for blank fields (nothing is sent), otherwise
    /// see [`ApiError`].
    pub async fn register(&self, registration: &Registration) -> Result<AuthGrant, ApiError> {
        registration.validate()?;
        tracing::debug!(username = %registration.username, "registering");
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(registration)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_json(response).await
    }

    /// `GET /api/users/check-username?username=...`.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn username_available(&self, username: &str) -> Result<bool, ApiError> {
        let response = self
            .http
            .get(self.url("/api/users/check-username"))
            .query(&[("username", username)])
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let body: UsernameAvailability = read_json(response).await?;
        Ok(body.available)
    }

    /// `GET /api/rants`, authenticated when a token is given.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn fetch_rants(&self, token: Option<&str>) -> Result<Vec<Rant>, ApiError> {
        let mut request = self.http.get(self.url("/api/rants"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_json(response).await
    }
}

/// Decodes a success body as `T`, or turns an error status into
/// [`ApiError::Rejected`] using the body's `error` field when present.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        tracing::debug!(status = status.as_u16(), %message, "request rejected");
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

impl Authenticator for ApiClient {
    async fn authenticate(&self, request: &AuthRequest) -> Result<AuthGrant, SessionError> {
        let result = match request {
            AuthRequest::Login(credentials) => self.login(credentials).await,
            AuthRequest::Register(registration) => self.register(registration).await,
        };
        result.map_err(|e| {
            tracing::info!(kind = request.kind(), error = %e, "authentication failed");
            SessionError::AuthFailed(e.user_message())
        })
    }
}
