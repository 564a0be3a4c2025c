//! Error types for the API client.

use citizen_protocol::ProtocolError;

/// Shown to the user whenever the server didn't say what went wrong.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Errors that can occur talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP client couldn't be constructed (bad TLS setup, etc.).
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(String),

    /// The request never got a response: DNS, refused, timed out.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    /// `message` is the body's `error` field, or the generic message.
    #[error("server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A success response whose body didn't match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The request was refused locally before sending (blank fields).
    #[error(transparent)]
    Invalid(#[from] ProtocolError),
}

impl ApiError {
    /// Text fit for an alert dialog.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Invalid(ProtocolError::InvalidMessage(msg)) => msg.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
