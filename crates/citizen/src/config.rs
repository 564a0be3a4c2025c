//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use citizen_api::ApiConfig;
use citizen_session::SessionConfig;

pub const DEFAULT_STORAGE_PATH: &str = "./citizen-session.json";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable that must be a number isn't one.
    #[error("{var} must be a whole number of seconds, got '{value}'")]
    InvalidNumber { var: String, value: String },

    /// A variable is set but empty.
    #[error("{var} is set but empty")]
    Empty { var: String },
}

/// Everything needed to build a [`CitizenClient`](crate::CitizenClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitizenConfig {
    pub api: ApiConfig,
    /// File the session (and onboarding flag) is persisted to.
    pub storage_path: PathBuf,
    pub session: SessionConfig,
}

impl Default for CitizenConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            session: SessionConfig::default(),
        }
    }
}

impl CitizenConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `CITIZEN_API_URL`: default `http://localhost:3000`
    /// - `CITIZEN_STORAGE_PATH`: default `./citizen-session.json`
    /// - `CITIZEN_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CITIZEN_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    /// [`ConfigError`] if a variable is set to something unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// # Errors
    /// [`ConfigError`] if a variable is set to something unusable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match non_empty(&lookup, "CITIZEN_API_URL")? {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => defaults.api.base_url,
        };
        let storage_path = non_empty(&lookup, "CITIZEN_STORAGE_PATH")?
            .map_or(defaults.storage_path, PathBuf::from);
        let request_timeout =
            secs(&lookup, "CITIZEN_REQUEST_TIMEOUT_SECS", defaults.api.request_timeout)?;
        let connect_timeout =
            secs(&lookup, "CITIZEN_CONNECT_TIMEOUT_SECS", defaults.api.connect_timeout)?;

        Ok(Self {
            api: ApiConfig {
                base_url,
                request_timeout,
                connect_timeout,
            },
            storage_path,
            session: defaults.session,
        })
    }
}

fn non_empty<F>(lookup: &F, var: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Err(ConfigError::Empty { var: var.to_string() }),
        Some(v) => Ok(Some(v.trim().to_string())),
    }
}

fn secs<F>(lookup: &F, var: &str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = non_empty(lookup, var)? else {
        return Ok(default);
    };
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidNumber {
            var: var.to_string(),
            value: raw,
        })
}
