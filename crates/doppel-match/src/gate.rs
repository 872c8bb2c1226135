//! Creation-time duplicate gate.

use crate::similarity::score;
use crate::{MatchError, MatchResult};
use doppel_core::settings::Settings;
use doppel_core::types::ProductVector;
use doppel_embeddings::TextEmbedder;
use std::sync::Arc;
use tracing::{debug, warn};

/// An existing catalog product as the gate sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedProduct {
    pub id: i64,
    pub name: String,
    /// Stored vector; products created while the provider was down
    /// have none.
    pub vector: Option<ProductVector>,
}

/// Screens new products against the existing catalog before creation.
///
/// The gate embeds the candidate text and walks the existing products
/// in order, comparing stored vectors. Provider trouble narrows the
/// check instead of blocking creation: an embedding failure skips the
/// check entirely, an incomparable stored vector skips that product.
pub struct DuplicateGate {
    embedder: Arc<dyn TextEmbedder>,
    threshold: f64,
}

impl DuplicateGate {
    /// Create a gate with an explicit threshold.
    pub fn new(embedder: Arc<dyn TextEmbedder>, threshold: f64) -> Self {
        Self {
            embedder,
            threshold,
        }
    }

    /// Create a gate using the configured duplicate threshold.
    pub fn from_settings(embedder: Arc<dyn TextEmbedder>, settings: &Settings) -> Self {
        Self::new(embedder, settings.duplicate_threshold)
    }

    /// The similarity threshold above which a candidate is rejected.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Check a candidate against existing products.
    ///
    /// Returns the candidate's vector for the caller to persist when no
    /// duplicate is found, or `None` when embedding failed and the
    /// product should be created without a vector. The first existing
    /// product whose similarity is strictly above the threshold aborts
    /// the check with [`MatchError::Duplicate`].
    pub async fn check(
        &self,
        candidate_text: &str,
        existing: &[EmbeddedProduct],
    ) -> MatchResult<Option<ProductVector>> {
        let candidate = match self.embedder.embed(candidate_text).await {
            Ok(vector) => vector,
            Err(e) => {
                warn!(
                    "Embedding generation failed: {}. Creating product without embedding.",
                    e
                );
                return Ok(None);
            }
        };

        for product in existing {
            let vector = match &product.vector {
                Some(vector) => vector,
                None => continue,
            };

            let similarity = match score(&candidate, vector) {
                Ok(similarity) => similarity,
                Err(e) => {
                    warn!("Similarity comparison failed: {}", e);
                    continue;
                }
            };

            debug!("Similarity with {}: {}", product.name, similarity);

            if f64::from(similarity) > self.threshold {
                return Err(MatchError::Duplicate {
                    product_name: product.name.clone(),
                    similarity: f64::from(similarity),
                });
            }
        }

        Ok(Some(candidate))
    }
}
