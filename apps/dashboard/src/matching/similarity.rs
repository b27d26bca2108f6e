//! Cosine similarity

use ndarray::ArrayView1;

/// Cosine similarity between two embeddings, in [-1, 1].
///
/// Formula: cos(θ) = (A · B) / (||A|| ||B||)
///
/// A zero-magnitude vector scores 0.0.
///
/// # Panics
/// If the vectors differ in length. `rank_jobs` rejects mixed dimensions
/// before scoring.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "Embeddings must have same dimension (got {} and {})",
        a.len(),
        b.len()
    );

    let a_view = ArrayView1::from(a);
    let b_view = ArrayView1::from(b);

    let dot_product = a_view.dot(&b_view) as f64;
    let norm_a = (a_view.dot(&a_view) as f64).sqrt();
    let norm_b = (b_view.dot(&b_view) as f64).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
