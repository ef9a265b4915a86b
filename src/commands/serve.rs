//! `serve` command handler
//!
//! Runs the SSO routes with [`JsonIdentityHook`] as the acceptance hook so
//! the flow can be exercised end to end without a host application.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::{Result, SsoError};
use crate::routes;
use crate::sso::JsonIdentityHook;

/// Serve the SSO routes until Ctrl-C
///
/// # Arguments
///
/// * `config` - Validated configuration
///
/// # Errors
///
/// Returns error if the settings are invalid or the listener cannot bind
pub async fn run_serve(config: Config) -> Result<()> {
    let settings = Arc::new(config.sso_settings()?);
    let app = routes::router(settings, &config.server, Arc::new(JsonIdentityHook));

    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(|e| {
            SsoError::Config(format!(
                "failed to bind {}: {}",
                config.server.bind_address, e
            ))
        })?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        auth_route = %config.server.auth_route,
        callback_route = %config.server.callback_route,
        "SSO relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("SSO relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
