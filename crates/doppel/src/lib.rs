//! # Doppel
//!
//! AI-assisted duplicate detection for multi-vendor product catalogs.
//!
//! When many vendors upload overlapping products, the catalog fills
//! with near-identical listings. Doppel screens new products against
//! the existing catalog with two signals: embedding similarity for a
//! cheap creation-time gate, and LLM-extracted attributes for the
//! field-by-field comparison behind review queues and merge advice.
//!
//! ## Quick Start
//!
//! ```rust
//! use doppel::prelude::*;
//!
//! // Attribute comparison is pure: extraction happens elsewhere
//! let bottle = AttributeSet {
//!     brand: Some("Milton".to_string()),
//!     item_type: Some("water bottle".to_string()),
//!     size: Some("1L".to_string()),
//!     quantity: Some("1".to_string()),
//!     packaging: Some("box".to_string()),
//!     target_users: Some("school".to_string()),
//!     purpose: Some("hydration".to_string()),
//! };
//!
//! let report = compare_attributes(&bottle, &bottle);
//! assert_eq!(report.confidence_label, ConfidenceLabel::HighConfidenceDuplicate);
//! assert_eq!(report.similarity_score, 1.0);
//!
//! // Raw cosine over embedding vectors
//! let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
//! assert_eq!(sim, 0.0);
//! ```
//!
//! ## Gating product creation
//!
//! ```rust,ignore
//! use doppel::prelude::*;
//! use std::sync::Arc;
//!
//! let embedder = Arc::new(ApiEmbedder::from_env()?);
//! let settings = Settings::from_env()?;
//! let gate = DuplicateGate::from_settings(embedder, &settings);
//!
//! match gate.check("Steel Water Bottle 1L insulated", &existing).await {
//!     Ok(Some(vector)) => { /* persist the product with its vector */ }
//!     Ok(None) => { /* provider was down: persist without a vector */ }
//!     Err(MatchError::Duplicate { product_name, similarity }) => {
//!         // reject creation; the display string is vendor-facing
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Architecture
//!
//! Doppel is organized into several crates:
//!
//! - [`doppel_core`] - Shared domain types, principal, settings
//! - [`doppel_embeddings`] - Embedding providers behind [`TextEmbedder`](doppel_embeddings::TextEmbedder)
//! - [`doppel_llm`] - Chat backends and attribute extraction
//! - [`doppel_match`] - Duplicate gate, matching, merge advice
//!
//! ## Two similarity signals
//!
//! | Signal | Scale | Used for |
//! |--------|-------|----------|
//! | Embedding cosine | raw cosine, bands at 0.85 / 0.65 | creation gate, semantic pairwise check |
//! | Attribute overlap | matched keys / 7, bands at 0.90 / 0.70 | pairwise labels, top-N ranking, merge advice |
//!
//! The two scales are deliberately separate: a 0.86 embedding cosine is
//! unremarkable, while a 0.86 attribute score means six of seven keys
//! agree.

// Re-export all subcrates
pub use doppel_core as core;
pub use doppel_embeddings as embeddings;
pub use doppel_llm as llm;
pub use doppel_match as matching;

/// Prelude module for convenient imports.
///
/// ```rust
/// use doppel::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use doppel_core::principal::{Principal, Role};
    pub use doppel_core::settings::{Settings, SettingsError};
    pub use doppel_core::types::{
        AttributeSet, ComparisonReport, ConfidenceLabel, MergeAdvice, MergeRecommendation,
        ProductDescriptor, ProductVector, TopMatch,
    };

    // Embedding providers
    pub use doppel_embeddings::{
        ApiEmbedder, EmbeddingConfig, EmbeddingError, EmbeddingResult, HashEmbedder, MockEmbedder,
        TextEmbedder,
    };

    // LLM backends and extraction
    pub use doppel_llm::{
        AttributeExtractor, AttributePrompt, ChatBackend, LlmConfig, LlmError, LlmResult,
        MockBackend, OpenAiBackend, PromptTemplate,
    };

    // Matching
    pub use doppel_match::{
        backfill_embeddings, compare_attributes, compare_texts, confidence_label,
        cosine_similarity, recommend_merge, score, visible_for_matching, BackfillReport,
        CatalogProduct, DuplicateGate, EmbeddedProduct, MatchError, MatchResult, PairwiseMatch,
        ProductMatcher, SemanticLabel, SemanticMatch,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
