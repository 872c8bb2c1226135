//! # Doppel Match
//!
//! Duplicate detection for multi-vendor product catalogs.
//!
//! Two complementary signals drive everything here:
//! - **Embeddings** ([`DuplicateGate`], [`compare_texts`], [`backfill_embeddings`]):
//!   cheap cosine similarity over provider vectors, used to block obvious
//!   duplicates at creation time.
//! - **Extracted attributes** ([`ProductMatcher`], [`recommend_merge`]):
//!   an LLM pulls seven structured attributes out of the product text and
//!   field-by-field comparison scores the overlap.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use doppel_match::{DuplicateGate, MatchError};
//! use std::sync::Arc;
//!
//! let gate = DuplicateGate::new(embedder, 0.90);
//! match gate.check("Steel Water Bottle 1L", &existing).await {
//!     Ok(Some(vector)) => { /* store product with vector */ }
//!     Ok(None) => { /* store product without vector */ }
//!     Err(MatchError::Duplicate { product_name, similarity }) => {
//!         /* reject: near-identical to product_name */
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use doppel_embeddings::EmbeddingError;
use thiserror::Error;

/// Errors from matching operations.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A candidate crossed the duplicate threshold against an existing
    /// product. The display string is shown to vendors as-is.
    #[error("Duplicate detected: similar to '{product_name}' ({similarity:.2})")]
    Duplicate {
        product_name: String,
        similarity: f64,
    },

    /// Vectors come from different embedding models.
    #[error("Embedding model mismatch: expected {expected}, got {actual}")]
    ModelMismatch { expected: String, actual: String },

    /// Vectors have different dimensions.
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The embedding provider failed.
    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Result type for matching operations.
pub type MatchResult<T> = Result<T, MatchError>;

mod backfill;
mod catalog;
mod compare;
mod gate;
mod matcher;
mod merge;
mod semantic;
mod similarity;

pub use backfill::{backfill_embeddings, BackfillReport, CHUNK_SIZE};
pub use catalog::{visible_for_matching, CatalogProduct};
pub use compare::{compare_attributes, confidence_label, ATTRIBUTE_KEYS};
pub use gate::{DuplicateGate, EmbeddedProduct};
pub use matcher::{PairwiseMatch, ProductMatcher, TOP_MATCH_LIMIT};
pub use merge::recommend_merge;
pub use semantic::{compare_texts, SemanticLabel, SemanticMatch};
pub use similarity::{cosine_similarity, score};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{backfill_embeddings, BackfillReport};
    pub use crate::{compare_attributes, confidence_label, cosine_similarity, score};
    pub use crate::{compare_texts, SemanticLabel, SemanticMatch};
    pub use crate::{recommend_merge, visible_for_matching, CatalogProduct};
    pub use crate::{DuplicateGate, EmbeddedProduct};
    pub use crate::{MatchError, MatchResult};
    pub use crate::{PairwiseMatch, ProductMatcher};
}
