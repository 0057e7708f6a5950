use portal_client::config::get_configuration;
use portal_client::PortalClient;
use portal_core::observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "portal-client",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    )?;

    let client = PortalClient::new(&configuration)?;
    client.session.initialize().await;

    let session = client.session.snapshot().await;
    info!(
        backend = %configuration.backend.base_url,
        authenticated = session.authenticated,
        email = session.account_email.as_deref().unwrap_or("-"),
        role = session.role.as_deref().unwrap_or("-"),
        "Portal client ready"
    );

    let events = client.catalog.available_events().await;
    info!(count = events.len(), "Available events loaded");

    if session.authenticated {
        let editable = client.editors.editable_events().await;
        info!(count = editable.len(), "Editable events loaded");
    }

    Ok(())
}
