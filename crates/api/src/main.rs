//! ReviewBot - Teams meeting review service
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use reviewbot_api::utils::logging::init_tracing;
use reviewbot_api::{router, AppContext};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the subscriber so RUST_LOG from the file applies
    let dotenv = dotenvy::dotenv();
    init_tracing();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(err) => warn!(error = %err, "Could not load .env file"),
    }

    let config = reviewbot_infra::config::load().context("failed to load configuration")?;
    let bind_address = config.server.bind_address.clone();

    let context = Arc::new(AppContext::new(config).context("failed to build application context")?);

    let mut renewer = match context.start_subscription().await {
        Ok(renewer) => renewer,
        Err(err) => {
            error!(error = %err, "failed to register change subscription");
            None
        }
    };

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!(address = %bind_address, "ReviewBot listening");

    axum::serve(listener, router(context))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(renewer) = renewer.as_mut() {
        if let Err(err) = renewer.stop().await {
            warn!(error = %err, "failed to stop subscription renewer");
        }
    }

    info!("ReviewBot stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
