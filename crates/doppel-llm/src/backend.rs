//! Core chat backend trait.

use crate::prompt::{parse_attributes_json, AttributePrompt, PromptTemplate};
use async_trait::async_trait;
use doppel_core::settings::DEFAULT_CHAT_MODEL;
use doppel_core::types::AttributeSet;
use std::collections::HashMap;
use thiserror::Error;

/// LLM-related errors, roughly in the order a request can fail: transport
/// first, then the provider's verdict, then decoding what came back.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u32),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u32),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Parsing failed: {0}")]
    Parse(String),
}

/// Result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Per-request knobs shared by all backends.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model identifier sent to the provider.
    pub model: String,
    /// Completion length cap.
    pub max_tokens: u32,
    /// Sampling temperature; extraction runs near zero.
    pub temperature: f32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        // Attribute extraction wants short, near-deterministic output.
        Self {
            model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: 200,
            temperature: 0.1,
            timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set temperature, clamped to the API's accepted range.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u32) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Core trait for chat backends.
///
/// Implementors provide raw completions; attribute extraction is layered
/// on top of `complete` through the shared prompt, so every backend gets
/// it for free.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend identifier, e.g. `"openai"`.
    fn name(&self) -> &str;

    /// The configuration requests are made with.
    fn config(&self) -> &LlmConfig;

    /// Run a single completion and return the raw text.
    async fn complete(&self, prompt: &str) -> LlmResult<String>;

    /// Extract product attributes from text.
    async fn extract_attributes(&self, product_text: &str) -> LlmResult<AttributeSet> {
        let prompt = AttributePrompt::new(product_text);
        let response = self.complete(&prompt.generate()).await?;

        parse_attributes_json(&response).map_err(|e| {
            LlmError::Parse(format!(
                "Failed to parse attributes: {}. Response: {}",
                e, response
            ))
        })
    }

    /// Check if the backend is available.
    async fn health_check(&self) -> LlmResult<bool> {
        match self.complete("ping").await {
            Ok(_) => Ok(true),
            // Unreachable or unauthorized means down; an API-level error
            // still proves the provider answered.
            Err(LlmError::Connection(_)) | Err(LlmError::AuthenticationFailed) => Ok(false),
            Err(_) => Ok(true),
        }
    }
}

/// Canned-response backend for tests.
///
/// Responses match by substring against the generated prompt; a prompt
/// hitting a failure pattern errors like a provider outage. Unmatched
/// prompts get a fixed non-JSON reply, which conveniently exercises the
/// parse-failure paths.
pub struct MockBackend {
    config: LlmConfig,
    responses: HashMap<String, String>,
    failures: Vec<String>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            config: LlmConfig::default(),
            responses: HashMap::new(),
            failures: Vec::new(),
        }
    }

    /// Reply with `response` to any prompt containing `pattern`.
    pub fn with_response(mut self, pattern: &str, response: &str) -> Self {
        self.responses
            .insert(pattern.to_string(), response.to_string());
        self
    }

    /// Fail for any prompt containing `pattern`.
    pub fn with_failure(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        if let Some(pattern) = self.failures.iter().find(|p| prompt.contains(p.as_str())) {
            return Err(LlmError::Api(format!("Mock failure for '{}'", pattern)));
        }
        let canned = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            .map(|(_, response)| response.clone());
        Ok(canned.unwrap_or_else(|| "Mock response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_canned_and_fallback_responses() {
        let backend = MockBackend::new().with_response("bottle", "Bottle response");

        let response = backend.complete("A steel bottle").await.unwrap();
        assert_eq!(response, "Bottle response");

        let fallback = backend.complete("unmatched").await.unwrap();
        assert_eq!(fallback, "Mock response");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let backend = MockBackend::new().with_failure("bad");

        let result = backend.complete("a bad prompt").await;
        assert!(matches!(result, Err(LlmError::Api(_))));
    }

    #[tokio::test]
    async fn test_extract_attributes_via_mock() {
        let backend = MockBackend::new().with_response(
            "Camlin",
            r#"{"brand": "Camlin", "item_type": "geometry box", "size": null,
                "quantity": "1", "packaging": "box", "target_users": "school",
                "purpose": "geometry"}"#,
        );

        let attributes = backend
            .extract_attributes("Camlin Geometry Box")
            .await
            .unwrap();
        assert_eq!(attributes.brand.as_deref(), Some("Camlin"));
        assert_eq!(attributes.size, None);
    }

    #[tokio::test]
    async fn test_extract_attributes_bad_json_is_parse_error() {
        let backend = MockBackend::new().with_response("pencil", "not json at all");

        let result = backend.extract_attributes("pencil pack").await;
        match result {
            Err(LlmError::Parse(msg)) => {
                assert!(msg.contains("Failed to parse attributes"));
                assert!(msg.contains("not json at all"));
            }
            _ => panic!("expected Parse error"),
        }
    }

    #[tokio::test]
    async fn test_health_check_default() {
        let healthy = MockBackend::new();
        assert!(healthy.health_check().await.unwrap());

        let down = MockBackend::new().with_failure("ping");
        // Api errors still count as reachable
        assert!(down.health_check().await.unwrap());
    }

    #[test]
    fn test_config_defaults_match_extraction_call() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_tokens, 200);
        assert!((config.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_temperature_clamped() {
        let config = LlmConfig::default().with_temperature(9.0);
        assert!((config.temperature - 2.0).abs() < f32::EPSILON);
    }
}
