//! The current account identity and its durable mirror.
//!
//! One [`SessionStore`] is built by the application root and shared by
//! reference with everything that needs the session key. The in-memory
//! [`Session`] is the source of truth; the [`KeyValueStore`] only lets it
//! survive restarts.

use crate::error::ClientError;
use crate::models::{Session, SessionInfo};
use portal_core::storage::KeyValueStore;
use secrecy::Secret;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const SESSION_KEY_ENTRY: &str = "userKey";
pub const ACCOUNT_EMAIL_ENTRY: &str = "mail";
pub const ROLE_ENTRY: &str = "role";

const SESSION_ENTRIES: [&str; 3] = [SESSION_KEY_ENTRY, ACCOUNT_EMAIL_ENTRY, ROLE_ENTRY];

pub struct SessionStore {
    session: RwLock<Session>,
    storage: Option<Arc<dyn KeyValueStore>>,
}

impl SessionStore {
    /// `storage = None` means no durable storage: the session starts empty
    /// and is forgotten on exit.
    pub fn new(storage: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self {
            session: RwLock::new(Session::default()),
            storage,
        }
    }

    /// Adopt whatever a previous process persisted. Safe to call repeatedly.
    pub async fn initialize(&self) {
        let Some(storage) = &self.storage else {
            tracing::debug!("No durable storage configured, session starts empty");
            return;
        };

        let values = match storage.get_many(&SESSION_ENTRIES).await {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read persisted session, treating as logged out");
                return;
            }
        };

        let mut session = self.session.write().await;
        let mut values = values.into_iter();
        if let Some(key) = values.next().flatten() {
            session.session_key = Some(Secret::new(key));
        }
        if let Some(email) = values.next().flatten() {
            session.account_email = Some(email);
        }
        if let Some(role) = values.next().flatten() {
            session.role = Some(role);
        }

        tracing::info!(
            authenticated = session.is_authenticated(),
            "Session restored from storage"
        );
    }

    /// Start a session. All three values are persisted in one write.
    ///
    /// Blank arguments are the only error: they return `ValidationFailed`
    /// and leave the current session untouched.
    ///
    /// A failed write is logged and leaves storage as it was; the session
    /// is still active for this process.
    pub async fn login(&self, session_key: &str, email: &str, role: &str) -> Result<(), ClientError> {
        for (field, value) in [("session key", session_key), ("email", email), ("role", role)] {
            if value.is_empty() {
                return Err(ClientError::ValidationFailed(format!(
                    "The {} is required to log in",
                    field
                )));
            }
        }

        let mut session = self.session.write().await;

        if let Some(storage) = &self.storage {
            let entries = [
                (SESSION_KEY_ENTRY, session_key),
                (ACCOUNT_EMAIL_ENTRY, email),
                (ROLE_ENTRY, role),
            ];
            if let Err(e) = storage.set_many(&entries).await {
                tracing::error!(error = %e, "Failed to persist session");
            }
        }

        *session = Session {
            session_key: Some(Secret::new(session_key.to_string())),
            account_email: Some(email.to_string()),
            role: Some(role.to_string()),
        };

        tracing::info!(email = %email, role = %role, "User logged in");
        Ok(())
    }

    /// End the session here and in storage.
    pub async fn logout(&self) {
        let mut session = self.session.write().await;

        if let Some(storage) = &self.storage {
            if let Err(e) = storage.remove_many(&SESSION_ENTRIES).await {
                tracing::error!(error = %e, "Failed to clear persisted session");
            }
        }

        *session = Session::default();
        tracing::info!("User logged out");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    pub async fn snapshot(&self) -> SessionInfo {
        self.session.read().await.info()
    }

    /// Key for the token exchange, if the session holds a usable one.
    pub(crate) async fn session_key(&self) -> Option<Secret<String>> {
        let session = self.session.read().await;
        if session.is_authenticated() {
            session.session_key.clone()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::storage::MemoryStore;

    #[tokio::test]
    async fn login_requires_every_value() {
        let store = SessionStore::new(None);

        let result = store.login("abc", "", "admin").await;
        assert!(matches!(result, Err(ClientError::ValidationFailed(_))));
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn initialize_without_storage_is_a_no_op() {
        let store = SessionStore::new(None);
        store.initialize().await;
        store.initialize().await;

        assert_eq!(
            store.snapshot().await,
            SessionInfo {
                authenticated: false,
                account_email: None,
                role: None,
            }
        );
    }

    #[tokio::test]
    async fn initialize_adopts_partial_values() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        storage.set_many(&[(ACCOUNT_EMAIL_ENTRY, "a@b.c")]).await.unwrap();

        let store = SessionStore::new(Some(storage));
        store.initialize().await;

        let info = store.snapshot().await;
        assert!(!info.authenticated);
        assert_eq!(info.account_email.as_deref(), Some("a@b.c"));
        assert!(store.session_key().await.is_none());
    }
}
