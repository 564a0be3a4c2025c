//! # Citizen
//!
//! Client core for Citizen, a local civic-complaint app: users post short
//! complaints ("rants") about their city, upvote others, and collect points.
//!
//! This crate wires the layers together behind [`CitizenClient`]: durable
//! storage, the session store, and the backend API. Screens (or the CLI)
//! call `bootstrap()` once at startup, route on the result, and then use
//! `sign_in` / `register` / `sign_out`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use citizen::prelude::*;
//!
//! # async fn run() -> Result<(), CitizenError> {
//! let config = CitizenConfig::from_env()?;
//! let client = CitizenClient::from_config(&config)?;
//!
//! match client.bootstrap().await {
//!     Route::Feed => println!("welcome back"),
//!     other => println!("go to {other}"),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod telemetry;

pub use client::{CitizenClient, ONBOARDING_KEY};
pub use config::{CitizenConfig, ConfigError};
pub use error::CitizenError;
pub use telemetry::init_tracing;

/// Everything an app needs, in one import.
pub mod prelude {
    pub use crate::{CitizenClient, CitizenConfig, CitizenError, ConfigError, init_tracing};
    pub use citizen_api::{ApiClient, ApiConfig, ApiError};
    pub use citizen_feed::{Feed, FeedConfig, FeedError, PETITION_THRESHOLD, SortBy, Upvote};
    pub use citizen_protocol::{
        AuthGrant, Credentials, ProtocolError, Rant, RantId, Registration, UserId, UserProfile,
    };
    pub use citizen_session::{
        AuthRequest, Authenticator, PersistenceError, Route, SessionConfig, SessionError,
        SessionSnapshot, SessionStore, initial_route,
    };
    pub use citizen_storage::{DurableStorage, FileStorage, MemoryStorage, StorageError};
}
