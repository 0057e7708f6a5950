use portal_core::error::CoreError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No session key available")]
    MissingSession,

    #[error("Token fetch failed: {0}")]
    TokenFetchFailed(String),

    #[error("Could not obtain an access token")]
    Unauthenticated,

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Backend rejected the request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    BackendRejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] CoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message supplied by the backend, if this is a rejection that carried one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::BackendRejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
