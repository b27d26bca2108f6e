// Resume Ingestion: PDF upload → raw text → display keywords.

pub mod extract;
pub mod keywords;

pub use extract::{extract_text, validate_pdf_upload};
pub use keywords::extract_keywords;
