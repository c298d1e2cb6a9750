use anyhow::Context;
use tracing::info;

use crate::app::{app, AppState};
use crate::config::AppConfig;
use crate::database::open_store;

pub async fn handle(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    info!(
        "Starting School API in {:?} mode with {:?} storage",
        config.environment, config.storage.backend
    );

    let store = open_store(&config).await.context("failed to open store")?;
    let bind_addr = config.bind_addr();
    let router = app(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("School API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("School API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
