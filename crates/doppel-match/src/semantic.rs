//! Embedding-based pairwise comparison.

use crate::similarity::cosine_similarity;
use crate::MatchResult;
use doppel_embeddings::TextEmbedder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Similarity band for an embedding-based comparison.
///
/// These bands are looser than the attribute-based confidence labels:
/// raw cosine similarity runs higher than a seven-key attribute score,
/// so the cutoffs sit lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemanticLabel {
    #[serde(rename = "High Similarity - Possible Duplicate")]
    HighPossibleDuplicate,
    #[serde(rename = "Medium Similarity - Needs Review")]
    MediumNeedsReview,
    #[serde(rename = "Low Similarity - New Product")]
    LowNewProduct,
}

impl fmt::Display for SemanticLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SemanticLabel::HighPossibleDuplicate => "High Similarity - Possible Duplicate",
            SemanticLabel::MediumNeedsReview => "Medium Similarity - Needs Review",
            SemanticLabel::LowNewProduct => "Low Similarity - New Product",
        };
        write!(f, "{}", label)
    }
}

/// Result of an embedding-based comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMatch {
    /// Cosine similarity rounded to three decimals.
    pub similarity_score: f64,
    #[serde(rename = "confidence_label")]
    pub label: SemanticLabel,
}

/// Compare two texts by embedding similarity.
///
/// Both texts are embedded with the same provider, so the vectors are
/// comparable by construction. Unlike the attribute path there is no
/// fail-open here: a provider failure propagates to the caller. The
/// label is derived from the unrounded similarity.
pub async fn compare_texts(
    embedder: &dyn TextEmbedder,
    text_a: &str,
    text_b: &str,
) -> MatchResult<SemanticMatch> {
    let a = embedder.embed(text_a).await?;
    let b = embedder.embed(text_b).await?;

    let similarity = f64::from(cosine_similarity(&a.values, &b.values));

    Ok(SemanticMatch {
        similarity_score: (similarity * 1000.0).round() / 1000.0,
        label: label_for(similarity),
    })
}

fn label_for(similarity: f64) -> SemanticLabel {
    if similarity > 0.85 {
        SemanticLabel::HighPossibleDuplicate
    } else if similarity > 0.65 {
        SemanticLabel::MediumNeedsReview
    } else {
        SemanticLabel::LowNewProduct
    }
}
