//! # Doppel LLM
//!
//! Chat backends and attribute extraction for doppel duplicate detection.
//!
//! Product text goes in, a structured [`AttributeSet`](doppel_core::types::AttributeSet)
//! comes out: the shared prompt asks the model for the seven catalog
//! attributes as JSON, and the parser tolerates the fenced and chatty
//! responses models actually produce.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use doppel_llm::{AttributeExtractor, OpenAiBackend};
//! use std::sync::Arc;
//!
//! let backend = OpenAiBackend::from_env()?;
//! let extractor = AttributeExtractor::new(Arc::new(backend));
//! let attributes = extractor.extract("Camlin Geometry Box for school").await;
//! ```

mod backend;
mod extractor;
mod openai;
mod prompt;

pub use backend::{ChatBackend, LlmConfig, LlmError, LlmResult, MockBackend};
pub use extractor::AttributeExtractor;
pub use openai::OpenAiBackend;
pub use prompt::{parse_attributes_json, AttributePrompt, PromptTemplate};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AttributeExtractor, OpenAiBackend};
    pub use crate::{AttributePrompt, PromptTemplate};
    pub use crate::{ChatBackend, LlmConfig, LlmError, LlmResult, MockBackend};
}
