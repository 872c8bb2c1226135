//! Fail-open attribute extraction.

use crate::backend::{ChatBackend, LlmResult};
use doppel_core::types::AttributeSet;
use std::sync::Arc;
use tracing::warn;

/// Attribute extractor wrapping a shared chat backend.
///
/// Matching code treats extraction as best-effort: a product whose
/// attributes cannot be extracted still flows through comparison, it
/// just matches nothing. [`AttributeExtractor::extract`] encodes that
/// policy; [`AttributeExtractor::try_extract`] keeps the error for
/// callers that want to surface it.
#[derive(Clone)]
pub struct AttributeExtractor {
    backend: Arc<dyn ChatBackend>,
}

impl AttributeExtractor {
    /// Create an extractor over a shared backend.
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Extract attributes, degrading to the unknown set on any failure.
    pub async fn extract(&self, product_text: &str) -> AttributeSet {
        match self.backend.extract_attributes(product_text).await {
            Ok(attributes) => attributes,
            Err(e) => {
                warn!("Error extracting attributes: {}", e);
                AttributeSet::unknown()
            }
        }
    }

    /// Extract attributes, surfacing call and parse errors.
    pub async fn try_extract(&self, product_text: &str) -> LlmResult<AttributeSet> {
        self.backend.extract_attributes(product_text).await
    }

    /// Name of the underlying backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}
