mod assist;
mod config;
mod editor;
mod errors;
mod export;
mod llm_client;
mod models;
mod preview;
mod routes;
mod state;
mod store;
mod template;
mod ticket;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assist::{BulletAssistant, HttpBulletSource};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    // LLM client backs the bullet endpoint only; the editor works without it
    let llm = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone()).context("failed to build LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(llm)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; /api/generate-bullets will answer with an error");
            None
        }
    };

    let source = HttpBulletSource::new(
        config.bullets_endpoint_url.clone(),
        Duration::from_secs(config.bullets_timeout_secs),
    )
    .context("failed to build bullet endpoint client")?;
    info!(endpoint = %config.bullets_endpoint_url, "bullet assistant configured");
    let assistant = BulletAssistant::new(Arc::new(source));

    let state = AppState::new(config.clone(), assistant, llm);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
