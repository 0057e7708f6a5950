use crate::config::BackendSettings;
use crate::error::ClientError;
use portal_core::observability::{TracedClientExt, TracedRequest};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde::Serialize;

/// HTTP access to the event API. Knows the base address and carries the
/// shared connection pool; knows nothing about credentials.
pub struct BackendClient {
    client: Client,
    settings: BackendSettings,
}

impl BackendClient {
    pub fn new(settings: BackendSettings) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            settings,
        })
    }

    pub fn base_url(&self) -> &str {
        self.settings.base_url.trim_end_matches('/')
    }

    /// Absolute URL for a path such as `/register/attendee`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Start a traced request against an absolute URL.
    pub fn request(&self, method: Method, url: &str) -> TracedRequest {
        self.client.traced_request(method, url)
    }

    /// Send a GET request with trace context propagation.
    pub async fn get(&self, path: &str, headers: HeaderMap) -> Result<reqwest::Response, ClientError> {
        let url = self.endpoint(path);

        self.client
            .traced_get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "GET request failed");
                ClientError::Transport(e)
            })
    }

    /// Send a JSON POST request with trace context propagation.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.endpoint(path);

        self.client
            .traced_post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "POST request failed");
                ClientError::Transport(e)
            })
    }
}

/// Read a response body as JSON, keeping the status. A body that is not
/// JSON yields `None` rather than an error.
pub(crate) async fn read_json(
    response: reqwest::Response,
) -> Result<(reqwest::StatusCode, Option<serde_json::Value>), ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    Ok((status, serde_json::from_slice(&bytes).ok()))
}

/// Non-empty `message` string of a JSON body.
pub(crate) fn message_of(body: Option<&serde_json::Value>) -> Option<String> {
    body.and_then(|value| value.get("message"))
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let backend = BackendClient::new(BackendSettings::new("http://localhost:3100/")).unwrap();
        assert_eq!(
            backend.endpoint("/login/getToken"),
            "http://localhost:3100/login/getToken"
        );
    }

    #[test]
    fn message_of_ignores_non_strings() {
        let body = serde_json::json!({ "message": ["a"] });
        assert_eq!(message_of(Some(&body)), None);

        let body = serde_json::json!({ "message": "" });
        assert_eq!(message_of(Some(&body)), None);

        let body = serde_json::json!({ "message": "ok" });
        assert_eq!(message_of(Some(&body)).as_deref(), Some("ok"));
    }
}
