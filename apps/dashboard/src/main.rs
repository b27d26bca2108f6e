mod config;
mod errors;
mod jobs;
mod matching;
mod recommendations;
mod resume;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::RemoteJobSource;
use crate::matching::embedding::{Embedder, HashingEmbedder, HttpEmbedder};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Match Dashboard v{}", env!("CARGO_PKG_VERSION"));

    let jobs = RemoteJobSource::new(
        config.jobs_api_url.clone(),
        config.jobs_timeout_secs.map(Duration::from_secs),
    )?;
    info!("Job listing source: {}", jobs.url());

    let embedder = build_embedder(&config)?;
    info!("Embedding backend: {}", embedder.backend());

    let state = AppState {
        config: config.clone(),
        jobs: Arc::new(jobs),
        embedder,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Remote embeddings when an API key is configured, otherwise the offline hashing embedder.
fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    match &config.embedding_api_key {
        Some(api_key) => {
            let embedder = HttpEmbedder::new(
                config.embedding_api_url.clone(),
                api_key.clone(),
                config.embedding_model.clone(),
            )?;
            info!("Using embedding model {}", embedder.model());
            Ok(Arc::new(embedder))
        }
        None => Ok(Arc::new(HashingEmbedder::default())),
    }
}
