//! Fabricated yearly posting counts shown next to each location match.
//!
//! These numbers are decorative: each year is an independent uniform draw
//! from a fixed, increasing band. They carry no signal about the posting.

use rand::Rng;
use serde::Serialize;

/// (year, inclusive min, inclusive max)
pub const TREND_BANDS: [(i32, u32, u32); 5] = [
    (2019, 20, 50),
    (2020, 50, 70),
    (2021, 70, 90),
    (2022, 90, 120),
    (2023, 120, 150),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub job_count: u32,
}

/// Draws one count per band, in year order.
pub fn fabricate_trend<R: Rng + ?Sized>(rng: &mut R) -> Vec<TrendPoint> {
    TREND_BANDS
        .iter()
        .map(|&(year, min, max)| TrendPoint {
            year,
            job_count: rng.random_range(min..=max),
        })
        .collect()
}
