use crate::error::ClientError;
use crate::models::envelope::MessageEnvelope;
use crate::models::{AvailableEvent, AvailableSpeaker};
use crate::services::backend_client::BackendClient;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub const EVENTS_PATH: &str = "/content";
pub const SPEAKERS_PATH: &str = "/content/speakers";

/// Public listings shown on the registration pages. No session needed.
pub struct Catalog {
    backend: Arc<BackendClient>,
}

impl Catalog {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn try_available_events(&self) -> Result<Vec<AvailableEvent>, ClientError> {
        self.fetch_list(EVENTS_PATH).await
    }

    pub async fn try_available_speakers(&self) -> Result<Vec<AvailableSpeaker>, ClientError> {
        self.fetch_list(SPEAKERS_PATH).await
    }

    pub async fn available_events(&self) -> Vec<AvailableEvent> {
        self.try_available_events().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load available events");
            Vec::new()
        })
    }

    pub async fn available_speakers(&self) -> Vec<AvailableSpeaker> {
        self.try_available_speakers().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load available speakers");
            Vec::new()
        })
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let response = self.backend.get(path, HeaderMap::new()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::BackendRejected {
                status,
                message: None,
            });
        }

        let envelope: MessageEnvelope<Vec<T>> = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        envelope
            .message
            .ok_or_else(|| ClientError::MalformedResponse(format!("{} has no message field", path)))
    }
}
