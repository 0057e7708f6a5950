pub mod config;
pub mod error;
pub mod models;
pub mod services;

use config::{BackendSettings, Settings};
use error::ClientError;
use portal_core::storage::{FileStore, KeyValueStore, MemoryStore};
use services::{
    auth_transport::AuthenticatedTransport, backend_client::BackendClient, catalog::Catalog,
    editors::Editors, registration::Registration, session_store::SessionStore,
    token_provider::TokenProvider,
};
use std::sync::Arc;

/// Application root: owns the one session and wires every service to it.
pub struct PortalClient {
    pub session: Arc<SessionStore>,
    pub transport: Arc<AuthenticatedTransport>,
    pub editors: Editors,
    pub catalog: Catalog,
    backend: Arc<BackendClient>,
}

impl PortalClient {
    /// Build from settings. A configured `storage.session_path` becomes a
    /// [`FileStore`]; otherwise a [`MemoryStore`] holds the session until exit.
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        let storage: Arc<dyn KeyValueStore> = match &settings.storage.session_path {
            Some(path) => Arc::new(FileStore::new(path)),
            None => {
                tracing::debug!("No session path configured, session is kept in memory");
                Arc::new(MemoryStore::new())
            }
        };

        Self::with_storage(settings.backend.clone(), Some(storage))
    }

    pub fn with_storage(
        backend: BackendSettings,
        storage: Option<Arc<dyn KeyValueStore>>,
    ) -> Result<Self, ClientError> {
        let backend = Arc::new(BackendClient::new(backend)?);
        let session = Arc::new(SessionStore::new(storage));
        let tokens = TokenProvider::new(backend.clone(), session.clone());
        let transport = Arc::new(AuthenticatedTransport::new(backend.clone(), tokens));

        Ok(Self {
            editors: Editors::new(transport.clone()),
            catalog: Catalog::new(backend.clone()),
            session,
            transport,
            backend,
        })
    }

    /// Token exchange bound to this client's session.
    pub fn token_provider(&self) -> TokenProvider {
        TokenProvider::new(self.backend.clone(), self.session.clone())
    }

    /// A fresh workflow for one registration form.
    pub fn registration(&self) -> Registration {
        Registration::new(self.backend.clone())
    }
}
