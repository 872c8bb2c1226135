//! Cosine similarity over tagged vectors.

use crate::{MatchError, MatchResult};
use doppel_core::types::ProductVector;

/// Compute cosine similarity between two raw vectors.
///
/// Mismatched lengths, empty input, and zero-norm vectors all yield
/// `0.0` rather than NaN. Pure and deterministic.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut sum_a = 0.0f32;
    let mut sum_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        sum_a += x * x;
        sum_b += y * y;
    }

    let norm_a = sum_a.sqrt();
    let norm_b = sum_b.sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Score two tagged vectors, refusing to mix vector spaces.
///
/// Stored vectors can outlive an embedding-model migration, so every
/// comparison against persisted data goes through here: differing model
/// tags or dimensions are an error, not a silently meaningless number.
pub fn score(a: &ProductVector, b: &ProductVector) -> MatchResult<f32> {
    if a.comparable_with(b) {
        return Ok(cosine_similarity(&a.values, &b.values));
    }
    if a.model != b.model {
        Err(MatchError::ModelMismatch {
            expected: a.model.clone(),
            actual: b.model.clone(),
        })
    } else {
        Err(MatchError::DimensionMismatch {
            expected: a.dimension(),
            actual: b.dimension(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![3.0, 4.0];
        let parallel = vec![6.0, 8.0];
        let orthogonal = vec![-4.0, 3.0];
        let opposite = vec![-3.0, -4.0];

        assert!((cosine_similarity(&a, &parallel) - 1.0).abs() < 0.001);
        assert!(cosine_similarity(&a, &orthogonal).abs() < 0.001);
        assert!((cosine_similarity(&a, &opposite) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_is_symmetric() {
        let a = vec![0.3, 0.5, 0.7];
        let b = vec![0.9, 0.1, 0.4];

        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_similarity_scale_invariant() {
        let a = vec![1.0, 2.0, 3.0];
        let b: Vec<f32> = a.iter().map(|x| x * 10.0).collect();

        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_inputs_are_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_score_matching_tags() {
        let a = ProductVector::new("text-embedding-3-small", vec![1.0, 0.0]);
        let b = ProductVector::new("text-embedding-3-small", vec![0.0, 1.0]);

        let sim = score(&a, &b).unwrap();
        assert!(sim.abs() < 0.001);
    }

    #[test]
    fn test_score_rejects_model_mismatch() {
        let a = ProductVector::new("text-embedding-3-small", vec![1.0, 0.0]);
        let b = ProductVector::new("hash-2", vec![1.0, 0.0]);

        match score(&a, &b) {
            Err(MatchError::ModelMismatch { expected, actual }) => {
                assert_eq!(expected, "text-embedding-3-small");
                assert_eq!(actual, "hash-2");
            }
            _ => panic!("expected ModelMismatch"),
        }
    }

    #[test]
    fn test_score_rejects_dimension_mismatch() {
        let a = ProductVector::new("hash-3", vec![1.0, 0.0, 0.0]);
        let b = ProductVector::new("hash-3", vec![1.0, 0.0]);

        assert!(matches!(
            score(&a, &b),
            Err(MatchError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
