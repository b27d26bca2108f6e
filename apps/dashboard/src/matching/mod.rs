//! Ranking & Filtering: semantic ranking of postings against a resume,
//! location filtering, and the decorative trend series.
//!
//! The embedder is pluggable (`Arc<dyn Embedder>` in `AppState`); everything
//! else here is plain synchronous code over borrowed job lists.

pub mod embedding;
pub mod filtering;
pub mod ranking;
pub mod similarity;
pub mod trends;
