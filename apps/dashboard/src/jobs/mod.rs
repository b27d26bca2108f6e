//! Job Fetch — one call to the remote listing service per dashboard request.

pub mod client;
pub mod models;

pub use client::{JobFetchError, JobSource, RemoteJobSource};
pub use models::JobPosting;
