use portal_core::error::CoreError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub backend: BackendSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct BackendSettings {
    /// Scheme, host and port of the event API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Applied to every request when set. No timeout otherwise.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl BackendSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_secs: None,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:3100".to_string()
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct StorageSettings {
    /// Session file location. Without it the session lives in memory only.
    pub session_path: Option<PathBuf>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, CoreError> {
    let configuration_directory = portal_core::config::configuration_directory("portal-client")?;
    portal_core::config::load_layered(&configuration_directory)
}
