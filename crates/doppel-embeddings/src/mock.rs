//! Mock embedder for testing.

use crate::embedder::{EmbeddingError, EmbeddingResult, TextEmbedder};
use async_trait::async_trait;
use doppel_core::types::ProductVector;
use std::collections::HashMap;

/// Mock embedder returning canned vectors.
///
/// Patterns match by substring against the input text. Text that hits a
/// failure pattern errors like a provider outage; text that matches no
/// pattern embeds to the zero vector.
pub struct MockEmbedder {
    model: String,
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
    failures: Vec<String>,
}

impl MockEmbedder {
    /// Create a new mock with the given model tag and dimension.
    pub fn new(model: &str, dimension: usize) -> Self {
        Self {
            model: model.to_string(),
            dimension,
            vectors: HashMap::new(),
            failures: Vec::new(),
        }
    }

    /// Return `values` for any text containing `pattern`.
    pub fn with_vector(mut self, pattern: &str, values: Vec<f32>) -> Self {
        self.vectors.insert(pattern.to_string(), values);
        self
    }

    /// Fail for any text containing `pattern`.
    pub fn with_failure(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }
}

#[async_trait]
impl TextEmbedder for MockEmbedder {
    async fn embed(&self, text: &str) -> EmbeddingResult<ProductVector> {
        for pattern in &self.failures {
            if text.contains(pattern) {
                return Err(EmbeddingError::Api(format!(
                    "Mock failure for '{}'",
                    pattern
                )));
            }
        }
        for (pattern, values) in &self.vectors {
            if text.contains(pattern) {
                return Ok(ProductVector::new(&self.model, values.clone()));
            }
        }
        Ok(ProductVector::new(&self.model, vec![0.0; self.dimension]))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_vector() {
        let embedder =
            MockEmbedder::new("test-model", 3).with_vector("Bottle", vec![1.0, 0.0, 0.0]);

        let v = embedder.embed("Steel Water Bottle 1L").await.unwrap();
        assert_eq!(v.values, vec![1.0, 0.0, 0.0]);
        assert_eq!(v.model, "test-model");
    }

    #[tokio::test]
    async fn test_failure_pattern() {
        let embedder = MockEmbedder::new("test-model", 3).with_failure("Bottle");

        let result = embedder.embed("Steel Water Bottle 1L").await;
        assert!(matches!(result, Err(EmbeddingError::Api(_))));
    }

    #[tokio::test]
    async fn test_unmatched_text_is_zero_vector() {
        let embedder = MockEmbedder::new("test-model", 4);

        let v = embedder.embed("anything at all").await.unwrap();
        assert_eq!(v.values, vec![0.0; 4]);
    }

    #[tokio::test]
    async fn test_embed_batch_collects_in_order() {
        let embedder = MockEmbedder::new("test-model", 2)
            .with_vector("first", vec![1.0, 0.0])
            .with_vector("second", vec![0.0, 1.0]);

        let vectors = embedder.embed_batch(&["first", "second"]).await.unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].values, vec![1.0, 0.0]);
        assert_eq!(vectors[1].values, vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn test_embed_batch_stops_at_first_failure() {
        let embedder = MockEmbedder::new("test-model", 2).with_failure("bad");

        let result = embedder.embed_batch(&["good", "bad", "good"]).await;
        assert!(result.is_err());
    }
}
