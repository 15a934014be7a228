use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bookit_api::{app, AppState};
use bookit_core::SystemClock;
use bookit_store::app_config::Config;
use bookit_store::RemoteApiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "bookit_api=debug,tower_http=debug,axum::rejection=trace".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting BookIt on port {}", config.server.port);
    tracing::info!("Remote API at {}", config.api.base_url);

    let client = Arc::new(
        RemoteApiClient::new(&config.api.base_url, Duration::from_secs(config.api.timeout_seconds))
            .context("Failed to build remote API client")?,
    );

    let app_state = AppState::new(
        client.clone(),
        client,
        Arc::new(SystemClock),
        &config.api.base_url,
        &config.navigation,
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
