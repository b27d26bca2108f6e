//! Location filtering over the fetched listing.

use rand::Rng;
use serde::Serialize;

use crate::jobs::JobPosting;
use crate::matching::trends::{fabricate_trend, TrendPoint};

pub const ALL_LOCATIONS: &str = "All";
pub const LOCATION_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationFilter {
    All,
    /// Case-sensitive exact match on `candidate_required_location`.
    Exact(String),
}

impl LocationFilter {
    /// Only a missing value or exactly `"All"` means no filtering. Anything
    /// else, including an empty string, is matched verbatim.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some(ALL_LOCATIONS) => LocationFilter::All,
            Some(location) => LocationFilter::Exact(location.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LocationFilter::All => ALL_LOCATIONS,
            LocationFilter::Exact(location) => location,
        }
    }
}

/// A location match with its decorative trend series.
#[derive(Debug, Clone, Serialize)]
pub struct LocatedJob {
    pub job: JobPosting,
    pub trend: Vec<TrendPoint>,
}

/// `"All"` followed by each distinct location in first-seen order.
pub fn location_options(jobs: &[JobPosting]) -> Vec<String> {
    let mut options = vec![ALL_LOCATIONS.to_string()];
    for job in jobs {
        let location = &job.candidate_required_location;
        if !options.iter().any(|o| o == location) {
            options.push(location.clone());
        }
    }
    options
}

/// `All` returns the listing untouched; `Exact` keeps the first ten exact matches.
pub fn filter_by_location<'a>(
    jobs: &'a [JobPosting],
    filter: &LocationFilter,
) -> Vec<&'a JobPosting> {
    match filter {
        LocationFilter::All => jobs.iter().collect(),
        LocationFilter::Exact(location) => jobs
            .iter()
            .filter(|j| &j.candidate_required_location == location)
            .take(LOCATION_LIMIT)
            .collect(),
    }
}

/// Pairs each posting with a freshly drawn trend.
pub fn attach_trends<R: Rng + ?Sized>(jobs: &[&JobPosting], rng: &mut R) -> Vec<LocatedJob> {
    jobs.iter()
        .map(|job| LocatedJob {
            job: (*job).clone(),
            trend: fabricate_trend(rng),
        })
        .collect()
}
