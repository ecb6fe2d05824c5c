//! Secrets Gateway - Main Entry Point
//!
//! Startup order is load-bearing: configuration, credential, vault client,
//! then the remote configuration bootstrap must all complete before the
//! listener binds. Any failure along the way aborts startup.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use secrets_gateway::config::Config;
use secrets_gateway::state::AppState;
use secrets_gateway::{bootstrap, http, shutdown, telemetry};
use vault_client::{Credential, VaultClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    telemetry::init(config.log_json);

    info!("Starting Secrets Gateway");

    let credential = Credential::resolve().context("failed to resolve vault credential")?;
    info!(source = %credential.source(), "Resolved vault credential");

    let vault = Arc::new(
        VaultClient::new(config.vault_config(), credential)
            .context("failed to construct vault client")?,
    );

    let settings = bootstrap::load(&config, &vault)
        .await
        .context("remote configuration bootstrap failed")?;
    info!(entries = settings.len(), "Configuration bootstrap complete");

    let state = AppState::new(vault, Arc::new(settings));
    let app = http::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Secrets Gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .context("server error")?;

    info!("Secrets Gateway stopped");
    Ok(())
}
