//! OpenAI chat-completions backend.

use crate::backend::{ChatBackend, LlmConfig, LlmError, LlmResult};
use async_trait::async_trait;
use doppel_core::settings::Settings;
use serde::{Deserialize, Serialize};
use tracing::debug;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

/// Chat backend over the OpenAI completions API.
///
/// # Example
///
/// ```rust,ignore
/// use doppel_llm::{ChatBackend, OpenAiBackend};
///
/// let backend = OpenAiBackend::new("sk-...")?;
/// let attributes = backend.extract_attributes("Camlin Geometry Box").await?;
/// ```
pub struct OpenAiBackend {
    api_key: String,
    config: LlmConfig,
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiBackend {
    /// Create a backend with the extraction defaults.
    ///
    /// An empty key is rejected here rather than on the first request.
    pub fn new(api_key: &str) -> LlmResult<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create with custom config.
    pub fn with_config(api_key: &str, config: LlmConfig) -> LlmResult<Self> {
        if api_key.is_empty() {
            return Err(LlmError::AuthenticationFailed);
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(u64::from(config.timeout_secs)))
            .build()
            .map_err(|e| LlmError::Api(e.to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            config,
            client,
            endpoint: OPENAI_API_URL.to_string(),
        })
    }

    /// Create from application settings.
    pub fn from_settings(settings: &Settings) -> LlmResult<Self> {
        let api_key = settings
            .openai_api_key
            .as_deref()
            .ok_or(LlmError::AuthenticationFailed)?;
        Self::with_config(
            api_key,
            LlmConfig::default().with_model(&settings.chat_model),
        )
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> LlmResult<Self> {
        let settings = Settings::from_env().map_err(|e| LlmError::Api(e.to_string()))?;
        Self::from_settings(&settings)
    }

    /// Override the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.config.model = model.to_string();
        self
    }

    /// Point requests at a different endpoint (Azure OpenAI or compatible).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_connect() {
            LlmError::Connection("Cannot connect to OpenAI API".to_string())
        } else if e.is_timeout() {
            LlmError::Timeout(self.config.timeout_secs)
        } else {
            LlmError::Api(e.to_string())
        }
    }

    async fn request(&self, prompt: &str, system: Option<&str>) -> LlmResult<String> {
        let messages: Vec<ChatMessage> = system
            .map(|sys| ChatMessage {
                role: "system",
                content: sys.to_string(),
            })
            .into_iter()
            .chain(std::iter::once(ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }))
            .collect();

        let body = ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Chat completion with model {}", self.config.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited(60),
                404 => LlmError::ModelNotFound(self.config.model.clone()),
                _ => LlmError::Api(format!("OpenAI API error {}: {}", status, detail)),
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        match reply.choices.first() {
            Some(choice) => Ok(choice.message.content.trim().to_string()),
            None => Err(LlmError::InvalidResponse(
                "No choices in response".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        self.request(prompt, None).await
    }
}
