//! Session management for the Citizen client.
//!
//! This crate is the single authority for "is there a logged-in user":
//!
//! 1. **Authentication**: trading credentials for a token
//!    ([`Authenticator`] trait, implemented by the API client)
//! 2. **Session state**: the current token and profile
//!    ([`SessionStore`], observed through [`SessionSnapshot`])
//! 3. **Persistence**: mirroring that state into two durable keys so
//!    the session survives an app restart
//! 4. **Launch routing**: deciding the first screen ([`initial_route`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Screens / CLI (above)  ← read snapshots, call login()/logout()
//!     ↕
//! Session Layer (this crate)  ← owns token + user, writes userToken/userData
//!     ↕
//! Storage + Protocol (below)  ← DurableStorage, UserProfile, JsonCodec
//! ```

mod auth;
mod error;
mod route;
mod session;
mod store;

pub use auth::{AuthRequest, Authenticator};
pub use error::{PersistenceError, SessionError};
pub use route::{Route, initial_route};
pub use session::{SessionConfig, SessionSnapshot};
pub use store::SessionStore;
