//! Student Info API server: loads `.env`, connects the store, serves the router until Ctrl-C.

use student_records::{app, connect, routes::ROUTE_TABLE, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_records=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store = connect(&config.database).await?;
    let router = app(AppState::new(store.clone()), config.cors_origin.clone());

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Student Info API listening on http://{}", addr);
    for (method, path) in ROUTE_TABLE {
        tracing::info!("  {:<6} http://{}{}", method, addr, path);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("store closed, shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
