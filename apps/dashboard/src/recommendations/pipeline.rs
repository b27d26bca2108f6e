//! Recommendation pipeline — turns extracted resume text into a dashboard report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::{JobPosting, JobSource};
use crate::matching::embedding::Embedder;
use crate::matching::filtering::{
    attach_trends, filter_by_location, location_options, LocatedJob, LocationFilter,
};
use crate::matching::ranking::{build_recommendations, rank_jobs, Recommendation};
use crate::resume::extract_keywords;

pub const EMPTY_RESUME_WARNING: &str = "No text could be extracted from the uploaded PDF.";

/// Everything the dashboard page renders for one upload.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub resume_text: String,
    pub keywords: Vec<String>,
    pub warning: Option<String>,
    pub recommendations: Vec<Recommendation>,
    pub locations: Vec<String>,
    pub location_filter: String,
    /// Empty when the filter is "All".
    pub filtered_jobs: Vec<LocatedJob>,
}

impl DashboardReport {
    fn new(request_id: Uuid, resume_text: String, location: &LocationFilter) -> Self {
        Self {
            request_id,
            generated_at: Utc::now(),
            resume_text,
            keywords: Vec::new(),
            warning: None,
            recommendations: Vec::new(),
            locations: Vec::new(),
            location_filter: location.as_str().to_string(),
            filtered_jobs: Vec::new(),
        }
    }
}

/// Collaborators and knobs for one pipeline run.
pub struct PipelineDeps<'a> {
    pub jobs: &'a dyn JobSource,
    pub embedder: &'a dyn Embedder,
    pub top_n: usize,
}

/// Builds the report for already-extracted resume text.
///
/// Empty text short-circuits with a warning: the listing is not fetched and
/// nothing is ranked. A failed fetch aborts the run with `AppError::JobFetch`.
#[instrument(skip_all, fields(request_id = %request_id, location = location.as_str()))]
pub async fn build_report(
    request_id: Uuid,
    resume_text: String,
    location: &LocationFilter,
    deps: PipelineDeps<'_>,
) -> Result<DashboardReport, AppError> {
    let mut report = DashboardReport::new(request_id, resume_text, location);

    if report.resume_text.trim().is_empty() {
        warn!("Resume produced no text; skipping ranking");
        report.warning = Some(EMPTY_RESUME_WARNING.to_string());
        return Ok(report);
    }

    report.keywords = extract_keywords(&report.resume_text).into_iter().collect();

    let jobs = deps.jobs.fetch_jobs().await?;

    let ranked = rank_jobs(&report.resume_text, &jobs, deps.embedder, deps.top_n).await?;
    report.recommendations = build_recommendations(ranked, &jobs);

    report.locations = location_options(&jobs);
    report.filtered_jobs = located_jobs(&jobs, location);

    info!(
        "Report ready: {} recommendations, {} location matches",
        report.recommendations.len(),
        report.filtered_jobs.len()
    );
    Ok(report)
}

/// Location matches with trends. Nothing is listed for "All".
fn located_jobs(jobs: &[JobPosting], location: &LocationFilter) -> Vec<LocatedJob> {
    if *location == LocationFilter::All {
        return Vec::new();
    }
    let matches = filter_by_location(jobs, location);
    attach_trends(&matches, &mut rand::rng())
}
