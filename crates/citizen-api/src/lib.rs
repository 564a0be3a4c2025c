//! HTTP client for the Citizen backend.
//!
//! Wraps the handful of endpoints the app calls: log in, register, check
//! whether a username is free, and fetch the rant feed. [`ApiClient`] also
//! implements [`citizen_session::Authenticator`], which is how the session
//! store gets its tokens.

mod client;
mod error;

pub use client::{ApiClient, ApiConfig};
pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
