//! The only way protected requests leave the process.
//!
//! Every call fetches a fresh token first. Without one the call fails with
//! [`ClientError::Unauthenticated`] and nothing is sent.

use crate::error::ClientError;
use crate::services::backend_client::BackendClient;
use crate::services::token_provider::TokenProvider;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use std::sync::Arc;

/// Caller-controlled parts of a protected request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn put_json(body: serde_json::Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

pub struct AuthenticatedTransport {
    backend: Arc<BackendClient>,
    tokens: TokenProvider,
}

impl AuthenticatedTransport {
    pub fn new(backend: Arc<BackendClient>, tokens: TokenProvider) -> Self {
        Self { backend, tokens }
    }

    pub fn endpoint(&self, path: &str) -> String {
        self.backend.endpoint(path)
    }

    /// Perform `options` against `url` with `authorization: <token>` set.
    ///
    /// A caller-supplied authorization header is replaced. The response is
    /// returned whatever its status.
    pub async fn call(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ClientError> {
        let token = self
            .tokens
            .fetch_token()
            .await
            .ok_or(ClientError::Unauthenticated)?;

        let token_value = HeaderValue::from_str(token.expose()).map_err(|_| {
            tracing::error!("Token is not a valid header value");
            ClientError::Unauthenticated
        })?;

        let RequestOptions {
            method,
            mut headers,
            body,
        } = options;
        headers.insert(AUTHORIZATION, token_value);

        let mut request = self.backend.request(method.clone(), url).headers(headers);
        if let Some(body) = &body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            tracing::error!(method = %method, url = %url, error = %e, "Authenticated request failed");
            ClientError::Transport(e)
        })
    }
}
