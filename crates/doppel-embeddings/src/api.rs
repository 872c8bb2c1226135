//! API-based embedder for OpenAI-compatible embedding services.

use crate::embedder::{EmbeddingError, EmbeddingResult, TextEmbedder};
use async_trait::async_trait;
use doppel_core::settings::{Settings, DEFAULT_EMBEDDING_MODEL};
use doppel_core::types::ProductVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// Configuration for API-based embeddings.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// API key (required).
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// API endpoint; `None` means the OpenAI default.
    pub endpoint: Option<String>,
    /// Requested dimension, for models that support reduction.
    pub dimensions: Option<usize>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl EmbeddingConfig {
    /// Create a config for OpenAI embeddings.
    pub fn openai(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: None,
            dimensions: Some(1536),
            timeout_secs: 30,
        }
    }

    /// Override the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Set the requested dimension.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Use a custom endpoint (Azure or other compatible APIs).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Embedder backed by an OpenAI-compatible embeddings endpoint.
pub struct ApiEmbedder {
    config: EmbeddingConfig,
    client: reqwest::Client,
}

impl ApiEmbedder {
    /// Create a new API embedder.
    ///
    /// A missing API key fails here, not on the first request.
    pub fn new(config: EmbeddingConfig) -> EmbeddingResult<Self> {
        if config.api_key.is_empty() {
            return Err(EmbeddingError::Config(
                "OPENAI_API_KEY not set".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::Api(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Create from application settings.
    pub fn from_settings(settings: &Settings) -> EmbeddingResult<Self> {
        let api_key = settings.openai_api_key.as_deref().ok_or_else(|| {
            EmbeddingError::Config("OPENAI_API_KEY not set".to_string())
        })?;
        Self::new(EmbeddingConfig::openai(api_key).with_model(&settings.embedding_model))
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> EmbeddingResult<Self> {
        Self::from_settings(&Settings::from_env().map_err(|e| {
            EmbeddingError::Config(e.to_string())
        })?)
    }

    fn endpoint(&self) -> &str {
        self.config
            .endpoint
            .as_deref()
            .unwrap_or(OPENAI_EMBEDDINGS_URL)
    }
}

#[async_trait]
impl TextEmbedder for ApiEmbedder {
    async fn embed(&self, text: &str) -> EmbeddingResult<ProductVector> {
        let request = EmbeddingsRequest {
            model: self.config.model.clone(),
            input: vec![text.to_string()],
            dimensions: self.config.dimensions,
        };

        debug!(
            "Embedding {} chars with model {}",
            text.len(),
            self.config.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    EmbeddingError::Connection(
                        "Cannot connect to embeddings API".to_string(),
                    )
                } else if e.is_timeout() {
                    EmbeddingError::Timeout(self.config.timeout_secs)
                } else {
                    EmbeddingError::Api(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(EmbeddingError::Api(format!(
                "Embeddings API error {}: {}",
                status, message
            )));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        let values = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                EmbeddingError::InvalidResponse("No embedding in response".to_string())
            })?;

        Ok(ProductVector::new(&self.config.model, values))
    }

    fn dimension(&self) -> usize {
        self.config.dimensions.unwrap_or(1536)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
