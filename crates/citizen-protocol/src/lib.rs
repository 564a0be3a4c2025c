//! Shared data types for the Citizen client.
//!
//! This crate defines the "nouns" every other layer talks about:
//!
//! - **Types** ([`UserProfile`], [`AuthGrant`], [`Rant`], etc.): the
//!   structures exchanged with the remote service and written to
//!   durable storage.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those structures
//!   are converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding or validation.
//!
//! # Architecture
//!
//! ```text
//! Storage (strings) → Protocol (UserProfile) → Session (who is logged in)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    AuthGrant, Credentials, Rant, RantId, Registration, UserId, UserProfile,
};
