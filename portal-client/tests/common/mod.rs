#![allow(dead_code)]

use portal_client::config::BackendSettings;
use portal_client::models::{EventRef, Participant};
use portal_client::PortalClient;
use async_trait::async_trait;
use portal_core::error::CoreError;
use portal_core::storage::{KeyValueStore, MemoryStore};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_SESSION_KEY: &str = "abc";
pub const TEST_TOKEN: &str = "tok1";
pub const TEST_EMAIL: &str = "admin@example.com";
pub const TEST_ROLE: &str = "admin";

/// A portal client pointed at a stubbed backend.
pub struct TestPortal {
    pub server: MockServer,
    pub client: PortalClient,
    pub storage: Arc<dyn KeyValueStore>,
}

impl TestPortal {
    pub async fn spawn() -> Self {
        Self::spawn_with_storage(Arc::new(MemoryStore::new())).await
    }

    pub async fn spawn_with_storage(storage: Arc<dyn KeyValueStore>) -> Self {
        let server = MockServer::start().await;
        let client = PortalClient::with_storage(
            BackendSettings::new(server.uri()),
            Some(storage.clone()),
        )
        .expect("Failed to build portal client");

        TestPortal {
            server,
            client,
            storage,
        }
    }

    /// Log in with the standard test identity and stub the token exchange
    /// for it.
    pub async fn login_with_token(&self) {
        self.client
            .session
            .login(TEST_SESSION_KEY, TEST_EMAIL, TEST_ROLE)
            .await
            .expect("Failed to log in");

        Mock::given(method("GET"))
            .and(path("/login/getToken"))
            .and(header("userkey", TEST_SESSION_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": TEST_TOKEN })))
            .mount(&self.server)
            .await;
    }

    /// Requests the backend saw on `request_path`.
    pub async fn requests_to(&self, request_path: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == request_path)
            .collect()
    }
}

pub fn participant(name: &str) -> Participant {
    Participant {
        event_id: EventRef::Number(1),
        name: name.to_string(),
        lastname: "Doe".to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        institution: "UNAM".to_string(),
        faculty: "Sciences".to_string(),
        charge: None,
        courses: None,
    }
}

/// Storage whose writes always fail; reads see nothing.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Ok(None)
    }

    async fn set_many(&self, _entries: &[(&str, &str)]) -> Result<(), CoreError> {
        Err(CoreError::Storage("disk full".to_string()))
    }

    async fn remove_many(&self, _keys: &[&str]) -> Result<(), CoreError> {
        Err(CoreError::Storage("disk full".to_string()))
    }
}
