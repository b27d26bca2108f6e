use std::sync::Arc;

use crate::config::Config;
use crate::jobs::JobSource;
use crate::matching::embedding::Embedder;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; requests never share mutable data.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Listing service. Default: RemoteJobSource against JOBS_API_URL.
    pub jobs: Arc<dyn JobSource>,
    /// Pluggable embedder. Default: HashingEmbedder; HttpEmbedder when EMBEDDING_API_KEY is set.
    pub embedder: Arc<dyn Embedder>,
}
