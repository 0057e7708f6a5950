use crate::error::ClientError;
use crate::models::envelope::TokenResponse;
use crate::models::BearerToken;
use crate::services::backend_client::BackendClient;
use crate::services::session_store::SessionStore;
use metrics::counter;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use std::sync::Arc;

pub const TOKEN_PATH: &str = "/login/getToken";
pub const USER_KEY_HEADER: &str = "userkey";

/// Exchanges the session key for a bearer token, once per call.
pub struct TokenProvider {
    backend: Arc<BackendClient>,
    session: Arc<SessionStore>,
}

impl TokenProvider {
    pub fn new(backend: Arc<BackendClient>, session: Arc<SessionStore>) -> Self {
        Self { backend, session }
    }

    /// Fresh token, or `None` on any failure. Never errors; the reason is
    /// logged.
    pub async fn fetch_token(&self) -> Option<BearerToken> {
        match self.try_fetch_token().await {
            Ok(token) => {
                counter!("portal_token_fetch_total", "outcome" => "ok").increment(1);
                Some(token)
            }
            Err(ClientError::MissingSession) => {
                counter!("portal_token_fetch_total", "outcome" => "missing_session").increment(1);
                tracing::warn!("No session key in store, cannot request a token");
                None
            }
            Err(e) => {
                counter!("portal_token_fetch_total", "outcome" => "failed").increment(1);
                tracing::error!(error = %e, "Failed to obtain token");
                None
            }
        }
    }

    /// Same exchange, reporting why it failed.
    pub async fn try_fetch_token(&self) -> Result<BearerToken, ClientError> {
        let session_key = self
            .session
            .session_key()
            .await
            .ok_or(ClientError::MissingSession)?;

        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(session_key.expose_secret()).map_err(|_| {
            ClientError::TokenFetchFailed("session key is not a valid header value".to_string())
        })?;
        headers.insert(USER_KEY_HEADER, value);

        let response = self
            .backend
            .get(TOKEN_PATH, headers)
            .await
            .map_err(|e| ClientError::TokenFetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::TokenFetchFailed(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClientError::TokenFetchFailed(format!("unreadable token response: {}", e)))?;

        body.token
            .filter(|token| !token.is_empty())
            .map(BearerToken::new)
            .ok_or_else(|| ClientError::TokenFetchFailed("response has no token".to_string()))
    }
}
