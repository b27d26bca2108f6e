//! PDF text extraction for uploaded resumes.

use tracing::{debug, instrument};

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Rejects uploads that neither carry a `.pdf` name nor start with the PDF header.
pub fn validate_pdf_upload(file_name: Option<&str>, bytes: &[u8]) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded resume is empty".to_string()));
    }

    let named_pdf = file_name
        .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false);

    if !named_pdf && !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "Only PDF resumes are supported".to_string(),
        ));
    }

    Ok(())
}

/// Extracts the text of every page, concatenated in page order.
///
/// Runs on the blocking pool; a panic inside the PDF parser is reported as a
/// PDF error rather than tearing down the request task.
#[instrument(skip(bytes), fields(size = bytes.len()))]
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || extract_text_sync(&bytes))
        .await
        .map_err(|e| AppError::Pdf(format!("PDF parser aborted: {e}")))??;

    debug!("Extracted {} characters of resume text", text.len());
    Ok(text)
}

fn extract_text_sync(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| AppError::Pdf(e.to_string()))
}
