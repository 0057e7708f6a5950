//! Response bodies shared by several endpoints.

use serde::Deserialize;

/// `{ "message": ... }` as returned by list and registration endpoints.
#[derive(Debug, Deserialize)]
pub struct MessageEnvelope<T> {
    pub message: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: Option<String>,
}
