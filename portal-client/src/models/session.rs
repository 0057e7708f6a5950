use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

/// Identity of the logged-in account.
///
/// Authenticated means a non-empty session key is present; email and role
/// are descriptive only.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub session_key: Option<Secret<String>>,
    pub account_email: Option<String>,
    pub role: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.session_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            authenticated: self.is_authenticated(),
            account_email: self.account_email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Session view safe to hand to UI code: no key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub authenticated: bool,
    pub account_email: Option<String>,
    pub role: Option<String>,
}

/// Short-lived credential returned by `/login/getToken`. Opaque.
#[derive(Debug, Clone)]
pub struct BearerToken(Secret<String>);

impl BearerToken {
    pub fn new(token: String) -> Self {
        Self(Secret::new(token))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
