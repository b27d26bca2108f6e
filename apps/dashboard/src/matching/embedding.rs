//! Embedders — turn text into fixed-length vectors.
//!
//! Default: `HashingEmbedder` (pure-Rust, offline, deterministic, fully testable).
//! `HttpEmbedder` calls an OpenAI-compatible `/embeddings` endpoint and is chosen
//! at startup when an API key is configured.

use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use twox_hash::XxHash64;

/// Dimension of the hashing embedder's vectors.
pub const HASHING_DIMENSION: usize = 384;

/// Inputs per `/embeddings` request.
pub const HTTP_BATCH_SIZE: usize = 96;

/// Longer inputs are cut to this many characters before sending.
pub const MAX_INPUT_CHARS: usize = 8_000;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("expected {expected} embeddings, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("embedding response index {actual} at position {expected}")]
    IndexMismatch { expected: usize, actual: usize },

    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("embedding worker failed: {0}")]
    Worker(String),
}

/// The embedding trait. Implement this to swap backends without touching
/// the ranking or handler code.
///
/// Carried in `AppState` as `Arc<dyn Embedder>`.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// One vector per input text, in input order, all of the same dimension.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Short label reported in logs: "hashing" | "http".
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// HashingEmbedder
// ────────────────────────────────────────────────────────────────────────────

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("Invalid token regex pattern"));

/// Feature-hashed bag of lowercase word tokens, L2-normalized.
///
/// Each token lands in one bucket with a hash-derived sign, so unrelated
/// vocabularies stay close to orthogonal. Empty text embeds to the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(HASHING_DIMENSION)
    }
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];
        let lowered = text.to_lowercase();

        for token in TOKEN_RE.find_iter(&lowered) {
            let mut hasher = XxHash64::with_seed(0);
            token.as_str().hash(&mut hasher);
            let hash = hasher.finish();

            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let embedder = self.clone();
        let texts = texts.to_vec();
        tokio::task::spawn_blocking(move || {
            texts.iter().map(|t| embedder.embed_one(t)).collect()
        })
        .await
        .map_err(|e| EmbeddingError::Worker(e.to_string()))
    }

    fn backend(&self) -> &'static str {
        "hashing"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HttpEmbedder
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    index: usize,
    embedding: Vec<f32>,
}

/// Batch client for an OpenAI-compatible embeddings endpoint.
///
/// Inputs are sent `batch_size` at a time and each is cut to `max_input_chars`,
/// so a full listing stays within provider request limits.
#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    batch_size: usize,
    max_input_chars: usize,
}

impl HttpEmbedder {
    pub fn new(url: String, api_key: String, model: String) -> Result<Self, EmbeddingError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            url,
            api_key,
            model,
            batch_size: HTTP_BATCH_SIZE,
            max_input_chars: MAX_INPUT_CHARS,
        })
    }

    pub fn with_limits(mut self, batch_size: usize, max_input_chars: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self.max_input_chars = max_input_chars.max(1);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One request. Vectors come back in input order.
    async fn embed_batch(&self, inputs: Vec<&str>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let expected = inputs.len();
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: inputs,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut body: EmbeddingResponse = response.json().await?;
        if body.data.len() != expected {
            return Err(EmbeddingError::CountMismatch {
                expected,
                actual: body.data.len(),
            });
        }

        // The API does not promise response order; `index` is authoritative
        // and must cover 0..n exactly once.
        body.data.sort_by_key(|d| d.index);
        if let Some((position, datum)) = body
            .data
            .iter()
            .enumerate()
            .find(|(position, d)| d.index != *position)
        {
            return Err(EmbeddingError::IndexMismatch {
                expected: position,
                actual: datum.index,
            });
        }

        Ok(body.data.into_iter().map(|d| d.embedding).collect())
    }
}

/// The longest prefix of `text` with at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    #[instrument(skip(self, texts), fields(model = %self.model, inputs = texts.len()))]
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(texts.len());
        for (batch, chunk) in texts.chunks(self.batch_size).enumerate() {
            let inputs = chunk
                .iter()
                .map(|t| truncate_chars(t, self.max_input_chars))
                .collect();
            vectors.extend(self.embed_batch(inputs).await?);
            debug!(batch, embedded = vectors.len(), "Embedding batch complete");
        }

        let dimension = vectors[0].len();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(EmbeddingError::InvalidDimension {
                expected: dimension,
                actual: bad.len(),
            });
        }

        debug!("Received {} embeddings of dimension {}", vectors.len(), dimension);
        Ok(vectors)
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}
