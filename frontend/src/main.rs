//! Students UI server.
//!
//! Run from repo root: `cargo run -p students-ui`
//! Expects the API at `API_BASE_URL` (default `http://localhost:3000`).

use students_ui::{ui_routes, StudentsClient, UiConfig, UiState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("students_ui=info")),
        )
        .init();

    let config = UiConfig::from_env()?;
    let client = StudentsClient::new(config.students_endpoint());
    tracing::info!(api = %client.endpoint(), "using students API");

    let app = ui_routes(UiState { client });
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Students UI listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;
    Ok(())
}
