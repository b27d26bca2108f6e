use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::jobs::models::{JobListing, JobPosting};

#[derive(Debug, Error)]
pub enum JobFetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("listing service returned status {0}")]
    Status(u16),

    #[error("could not decode listing body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where job postings come from. Carried in `AppState` as `Arc<dyn JobSource>`.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<JobPosting>, JobFetchError>;
}

/// Fetches postings from a fixed listing endpoint with a single GET. No retries.
#[derive(Clone)]
pub struct RemoteJobSource {
    client: Client,
    url: String,
}

impl RemoteJobSource {
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(url: String, timeout: Option<Duration>) -> Result<Self, JobFetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl JobSource for RemoteJobSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_jobs(&self) -> Result<Vec<JobPosting>, JobFetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobFetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("Listing body received: {} bytes", body.len());

        let listing: JobListing = serde_json::from_str(&body)?;
        info!("Fetched {} job postings", listing.jobs.len());

        Ok(listing.jobs)
    }
}
