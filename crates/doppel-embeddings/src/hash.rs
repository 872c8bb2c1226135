//! Hash-based embedder (no network, no models).
//!
//! Creates fixed-dimension vectors by hashing words. Not as semantically
//! rich as provider embeddings, but deterministic and free, which makes
//! it a usable fallback for tests and offline runs.

use crate::embedder::{EmbeddingResult, TextEmbedder};
use async_trait::async_trait;
use doppel_core::types::ProductVector;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash-based embedder.
///
/// Hashes each word into several seeded slots of a fixed-dimension space
/// so collisions average out. Identical text always embeds to an
/// identical vector.
///
/// # Example
///
/// ```rust
/// use doppel_embeddings::{HashEmbedder, TextEmbedder};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let embedder = HashEmbedder::new(128);
/// let vector = embedder.embed("steel water bottle").await.unwrap();
/// assert_eq!(vector.dimension(), 128);
/// assert_eq!(vector.model, "hash-128");
/// # });
/// ```
pub struct HashEmbedder {
    model: String,
    dimension: usize,
    num_hashes: usize,
}

impl HashEmbedder {
    /// Create a new hash embedder with the specified dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            model: format!("hash-{}", dimension),
            dimension,
            num_hashes: 4, // seeded hashes per token
        }
    }

    /// Create with default dimension (256).
    pub fn default_dimension() -> Self {
        Self::new(256)
    }

    /// Split into lowercase word tokens, dropping one-char noise.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|word| word.len() > 1)
            .map(str::to_string)
            .collect()
    }

    /// Seeded slot index for a token.
    fn slot(&self, token: &str, seed: u64) -> usize {
        let mut hasher = DefaultHasher::new();
        (seed, token).hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }

    /// Seeded sign for a token, decorrelated from the slot hash.
    fn sign(&self, token: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        (seed + 1000, token).hash(&mut hasher);
        match hasher.finish() % 2 {
            0 => 1.0,
            _ => -1.0,
        }
    }

    fn embed_values(&self, text: &str) -> Vec<f32> {
        let tokens = self.tokenize(text);
        if tokens.is_empty() {
            // Blank text, or nothing but one-char tokens: zero vector.
            return vec![0.0; self.dimension];
        }

        // Signed multi-hash accumulation, then scale to unit norm.
        let mut values = vec![0.0f32; self.dimension];
        for token in &tokens {
            for seed in 0..self.num_hashes as u64 {
                values[self.slot(token, seed)] += self.sign(token, seed);
            }
        }

        let denom = ((tokens.len() * self.num_hashes) as f32).sqrt();
        for value in &mut values {
            *value /= denom;
        }

        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut values {
                *value /= norm;
            }
        }

        values
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::default_dimension()
    }
}

#[async_trait]
impl TextEmbedder for HashEmbedder {
    async fn embed(&self, text: &str) -> EmbeddingResult<ProductVector> {
        Ok(ProductVector::new(&self.model, self.embed_values(text)))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
