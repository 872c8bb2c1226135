//! # Doppel Embeddings
//!
//! Embedding providers for doppel duplicate detection.
//!
//! This crate turns product text into tagged vectors:
//! - [`ApiEmbedder`]: OpenAI-compatible embeddings API
//! - [`HashEmbedder`]: deterministic hash embeddings, no network
//! - [`MockEmbedder`]: canned vectors and injected failures for tests
//!
//! All providers implement [`TextEmbedder`] and stamp every vector with
//! the model that produced it, so downstream scoring can refuse to mix
//! vector spaces.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use doppel_embeddings::{ApiEmbedder, TextEmbedder};
//!
//! let embedder = ApiEmbedder::from_env()?;
//! let vector = embedder.embed("Steel Water Bottle 1L insulated").await?;
//! ```

mod api;
mod embedder;
mod hash;
mod mock;

pub use api::{ApiEmbedder, EmbeddingConfig};
pub use embedder::{EmbeddingError, EmbeddingResult, TextEmbedder};
pub use hash::HashEmbedder;
pub use mock::MockEmbedder;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiEmbedder, EmbeddingConfig};
    pub use crate::{EmbeddingError, EmbeddingResult, TextEmbedder};
    pub use crate::{HashEmbedder, MockEmbedder};
}
