//! Ranking — scores every posting against the resume and keeps the best few.
//!
//! Algorithm:
//! 1. Embed `[resume, "{title} {description}" for each posting]` in one batch
//! 2. score = cosine(resume, posting)
//! 3. Stable sort descending (ties keep listing order), truncate to `top_n`
//! 4. Attach up to two postings from the same category as "related"

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::jobs::JobPosting;
use crate::matching::embedding::{Embedder, EmbeddingError};
use crate::matching::similarity::cosine_similarity;

pub const DEFAULT_TOP_N: usize = 5;
pub const RELATED_LIMIT: usize = 2;

/// A posting paired with its similarity to the resume.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredJob {
    pub job: JobPosting,
    pub score: f64,
}

/// A top match plus other postings hiring for the same category.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub job: JobPosting,
    pub score: f64,
    pub related: Vec<JobPosting>,
}

/// Ranks `jobs` by semantic similarity to `resume_text`, best first.
#[instrument(skip_all, fields(jobs = jobs.len(), top_n = top_n, backend = embedder.backend()))]
pub async fn rank_jobs(
    resume_text: &str,
    jobs: &[JobPosting],
    embedder: &dyn Embedder,
    top_n: usize,
) -> Result<Vec<ScoredJob>, EmbeddingError> {
    if jobs.is_empty() || top_n == 0 {
        return Ok(Vec::new());
    }

    let texts: Vec<String> = std::iter::once(resume_text.to_string())
        .chain(jobs.iter().map(JobPosting::embedding_text))
        .collect();

    let vectors = embedder.embed(&texts).await?;
    if vectors.len() != texts.len() {
        return Err(EmbeddingError::CountMismatch {
            expected: texts.len(),
            actual: vectors.len(),
        });
    }

    let dimension = vectors[0].len();
    if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
        return Err(EmbeddingError::InvalidDimension {
            expected: dimension,
            actual: bad.len(),
        });
    }

    let (resume_vector, job_vectors) = vectors.split_at(1);
    let ranked = select_top(&resume_vector[0], job_vectors, jobs, top_n);

    if let Some(best) = ranked.first() {
        debug!("Top match: '{}' score={:.3}", best.job.title, best.score);
    }
    Ok(ranked)
}

/// Scores, sorts and truncates. Pure so ordering rules can be tested directly.
pub fn select_top(
    resume_vector: &[f32],
    job_vectors: &[Vec<f32>],
    jobs: &[JobPosting],
    top_n: usize,
) -> Vec<ScoredJob> {
    let mut scored: Vec<ScoredJob> = jobs
        .iter()
        .zip(job_vectors)
        .map(|(job, vector)| ScoredJob {
            job: job.clone(),
            score: cosine_similarity(resume_vector, vector),
        })
        .collect();

    // `sort_by` is stable: equal scores keep listing order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(top_n);
    scored
}

/// The first `limit` postings in the full listing that share `category`.
/// The match itself is not excluded.
pub fn related_jobs(jobs: &[JobPosting], category: &str, limit: usize) -> Vec<JobPosting> {
    jobs.iter()
        .filter(|j| j.category == category)
        .take(limit)
        .cloned()
        .collect()
}

pub fn build_recommendations(ranked: Vec<ScoredJob>, jobs: &[JobPosting]) -> Vec<Recommendation> {
    ranked
        .into_iter()
        .map(|scored| {
            let related = related_jobs(jobs, &scored.job.category, RELATED_LIMIT);
            Recommendation {
                job: scored.job,
                score: scored.score,
                related,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::embedding::HashingEmbedder;
    use async_trait::async_trait;
    use std::collections::HashMap;

    fn job(title: &str, description: &str, category: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            company_name: format!("{title} Inc"),
            description: description.to_string(),
            category: category.to_string(),
            candidate_required_location: "Worldwide".to_string(),
            url: format!("https://jobs.example.com/{}", title.replace(' ', "-")),
        }
    }

    /// Returns a fixed vector per text; unknown text embeds to [0, 0].
    struct LookupEmbedder(HashMap<String, Vec<f32>>);

    #[async_trait]
    impl Embedder for LookupEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(texts
                .iter()
                .map(|t| self.0.get(t).cloned().unwrap_or_else(|| vec![0.0, 0.0]))
                .collect())
        }

        fn backend(&self) -> &'static str {
            "lookup"
        }
    }

    struct ShortEmbedder;

    #[async_trait]
    impl Embedder for ShortEmbedder {
        async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(vec![vec![1.0]])
        }

        fn backend(&self) -> &'static str {
            "short"
        }
    }

    #[tokio::test]
    async fn test_returns_exactly_top_five_sorted_descending() {
        let jobs: Vec<JobPosting> = [
            "rust tokio axum",
            "java spring",
            "rust embedded",
            "python django",
            "rust tokio",
            "golang grpc",
            "rust axum postgres",
            "watercolor",
        ]
        .iter()
        .enumerate()
        .map(|(i, d)| job(&format!("Role {i}"), d, "Software Development"))
        .collect();

        let ranked = rank_jobs(
            "rust tokio axum postgres",
            &jobs,
            &HashingEmbedder::default(),
            DEFAULT_TOP_N,
        )
        .await
        .unwrap();

        assert_eq!(ranked.len(), 5);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score, "not descending: {ranked:?}");
        }
    }

    #[tokio::test]
    async fn test_ties_keep_listing_order() {
        let jobs = vec![
            job("First", "same", "Ops"),
            job("Second", "same", "Ops"),
            job("Third", "different", "Ops"),
        ];
        let embedder = LookupEmbedder(HashMap::from([
            ("resume".to_string(), vec![1.0, 0.0]),
            ("First same".to_string(), vec![1.0, 1.0]),
            ("Second same".to_string(), vec![1.0, 1.0]),
            ("Third different".to_string(), vec![1.0, 0.0]),
        ]));

        let ranked = rank_jobs("resume", &jobs, &embedder, 5).await.unwrap();
        let titles: Vec<&str> = ranked.iter().map(|s| s.job.title.as_str()).collect();

        assert_eq!(titles, vec!["Third", "First", "Second"]);
    }

    #[tokio::test]
    async fn test_fewer_jobs_than_top_n_returns_all() {
        let jobs = vec![job("Only", "rust", "Dev"), job("Other", "go", "Dev")];
        let ranked = rank_jobs("rust", &jobs, &HashingEmbedder::default(), 5)
            .await
            .unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].job.title, "Only");
    }

    #[tokio::test]
    async fn test_empty_listing_ranks_nothing() {
        let ranked = rank_jobs("rust", &[], &ShortEmbedder, 5).await.unwrap();
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn test_embedder_count_mismatch_is_error() {
        let jobs = vec![job("A", "a", "Dev"), job("B", "b", "Dev")];
        let err = rank_jobs("resume", &jobs, &ShortEmbedder, 5).await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::CountMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_mixed_dimensions_are_rejected_before_scoring() {
        let jobs = vec![job("A", "a", "Dev"), job("B", "b", "Dev")];
        let embedder = LookupEmbedder(HashMap::from([
            ("resume".to_string(), vec![1.0, 0.0, 0.0]),
            ("A a".to_string(), vec![1.0, 0.0, 0.0]),
            ("B b".to_string(), vec![1.0, 0.0]),
        ]));

        let err = rank_jobs("resume", &jobs, &embedder, 5).await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::InvalidDimension {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_scores_stay_within_cosine_range() {
        let jobs = vec![job("A", "", "Dev"), job("B", "", "Dev")];
        let ranked = select_top(
            &[1.0, 0.0],
            &[vec![-3.0, 0.0], vec![2.0, 2.0]],
            &jobs,
            5,
        );
        assert!(ranked.iter().all(|s| (-1.0..=1.0).contains(&s.score)));
        assert_eq!(ranked[1].job.title, "A");
    }

    #[test]
    fn test_related_jobs_share_category_and_cap_at_two() {
        let jobs = vec![
            job("Backend", "", "Software Development"),
            job("Designer", "", "Design"),
            job("Frontend", "", "Software Development"),
            job("SRE", "", "Software Development"),
        ];
        let related = related_jobs(&jobs, "Software Development", RELATED_LIMIT);

        let titles: Vec<&str> = related.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Backend", "Frontend"]);
    }

    #[test]
    fn test_build_recommendations_attaches_related() {
        let jobs = vec![job("Backend", "", "Dev"), job("Designer", "", "Design")];
        let ranked = vec![ScoredJob {
            job: jobs[1].clone(),
            score: 0.9,
        }];

        let recs = build_recommendations(ranked, &jobs);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].related.len(), 1);
        assert_eq!(recs[0].related[0].title, "Designer");
    }
}
