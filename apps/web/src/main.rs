mod config;
mod errors;
mod intake;
mod navigation;
mod render;
mod routes;
mod state;
mod submission_client;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::submission_client::SubmissionClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing API_BASE_URL)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hirect web v{}", env!("CARGO_PKG_VERSION"));

    let client = SubmissionClient::new(&config.api_base_url)
        .context("API_BASE_URL must be an http(s) URL")?;
    info!(
        "Submission client ready (endpoint: {}, timeout: {}s)",
        client.endpoint(),
        client.timeout().as_secs()
    );
    info!(
        "Banner lifetimes: success={}ms validation_error={}ms submission_error={}ms",
        config.banners.success.as_millis(),
        config.banners.validation_error.as_millis(),
        config.banners.submission_error.as_millis()
    );

    let state = AppState {
        submitter: Arc::new(client),
        banners: config.banners,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
