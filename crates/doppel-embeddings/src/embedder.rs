//! Core embedder trait and error types.

use async_trait::async_trait;
use doppel_core::types::ProductVector;
use thiserror::Error;

/// Embedding error types.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Configuration error (missing key, bad endpoint).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Could not reach the provider.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request timed out.
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// The provider returned an error.
    #[error("API error: {0}")]
    Api(String),

    /// The provider answered with something we could not decode.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Core trait for embedding providers.
///
/// Implementations turn text into a [`ProductVector`] tagged with the
/// model that produced it. Callers compare vectors only when their tags
/// agree, so the tag must be stable for a given provider configuration.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Embed a single text string.
    ///
    /// Empty text is not an error; what it embeds to is up to the
    /// provider.
    async fn embed(&self, text: &str) -> EmbeddingResult<ProductVector>;

    /// Embed multiple texts.
    ///
    /// The default implementation embeds one at a time and stops at the
    /// first failure. Providers with a batch endpoint can override it.
    async fn embed_batch(&self, texts: &[&str]) -> EmbeddingResult<Vec<ProductVector>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Dimension of the vectors this embedder produces.
    fn dimension(&self) -> usize;

    /// Model tag stamped onto produced vectors.
    fn model_name(&self) -> &str;
}
