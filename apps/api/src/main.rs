mod analysis;
mod config;
mod errors;
mod llm_client;
mod models;
mod rate_limit;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::extractor::TextExtractor;
use crate::config::Config;
use crate::llm_client::{LlmBackend, LlmClient};
use crate::rate_limit::RateLimiter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruiter First API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.google_api_key.clone(),
        config.gemini_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )
    .context("Failed to build LLM HTTP client")?;
    info!("LLM client initialized (model: {})", llm.model());

    let rate_limiter = RateLimiter::new(
        config.rate_limit_per_window,
        Duration::from_secs(config.rate_limit_window_secs),
    );
    spawn_rate_limit_cleanup(rate_limiter.clone());

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        extractor: TextExtractor::default(),
        rate_limiter,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Periodically drops elapsed rate-limit windows so idle clients don't accumulate.
fn spawn_rate_limit_cleanup(rate_limiter: RateLimiter) {
    tokio::spawn(async move {
        let period = rate_limiter.window().max(Duration::from_secs(1));
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            rate_limiter.cleanup_expired().await;
        }
    });
}
