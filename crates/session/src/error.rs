//! Error types for the session library

use fitcoach_http::ClientError;
use thiserror::Error;

/// Result alias for session operations
pub type Result<T, E = AuthError> = std::result::Result<T, E>;

/// Errors while decoding an identity token
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Expected 3 token segments, found {0}")]
    SegmentCount(usize),

    #[error("Token payload is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Token payload is not valid claims JSON: {0}")]
    Claims(#[from] serde_json::Error),

    #[error("Token has no subject claim")]
    MissingSubject,
}

/// Errors raised inside the auth service
///
/// These never cross the public [`AuthService`](crate::AuthService) surface
/// except from construction; the service logs them and moves the session to
/// the logged-out state instead.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Token exchange failed: {0}")]
    Client(#[from] ClientError),

    #[error("Invalid identity token: {0}")]
    Token(#[from] TokenError),

    #[error("Failed to serialize user profile: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
