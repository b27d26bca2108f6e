//! Axum route handlers for the Recommendations API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::filtering::LocationFilter;
use crate::recommendations::pipeline::{build_report, DashboardReport, PipelineDeps};
use crate::resume::{extract_text, validate_pdf_upload};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const LOCATION_FIELD: &str = "location";

/// The parts of the multipart form the pipeline cares about.
#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    resume: Option<Vec<u8>>,
    location: Option<String>,
}

/// POST /api/v1/recommendations
///
/// Multipart form: `resume` (PDF file, required), `location` (optional, "All" by default).
/// Extracts the resume text, fetches the listing once, ranks and filters it.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DashboardReport>, AppError> {
    let request_id = Uuid::new_v4();
    let form = read_form(multipart).await?;

    let bytes = form.resume.ok_or_else(|| {
        AppError::Validation(format!("A PDF resume is required in the '{RESUME_FIELD}' field"))
    })?;
    validate_pdf_upload(form.file_name.as_deref(), &bytes)?;

    info!(
        %request_id,
        file_name = form.file_name.as_deref().unwrap_or("<unnamed>"),
        size = bytes.len(),
        "Resume uploaded"
    );

    let resume_text = extract_text(bytes).await?;
    let location = LocationFilter::parse(form.location.as_deref());

    let report = build_report(
        request_id,
        resume_text,
        &location,
        PipelineDeps {
            jobs: state.jobs.as_ref(),
            embedder: state.embedder.as_ref(),
            top_n: state.config.top_n,
        },
    )
    .await?;

    Ok(Json(report))
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                form.file_name = field.file_name().map(str::to_string);
                form.resume = Some(field.bytes().await.map_err(invalid_form)?.to_vec());
            }
            Some(LOCATION_FIELD) => {
                form.location = Some(field.text().await.map_err(invalid_form)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn invalid_form(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!("Resume upload is too large: {}", e.body_text()));
    }
    AppError::Validation(format!("Invalid upload: {}", e.body_text()))
}
