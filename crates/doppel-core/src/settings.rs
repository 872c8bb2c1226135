//! Environment-driven configuration.
//!
//! Settings are read once at startup and handed to the components that
//! need them. A malformed threshold is an operator error and fails
//! fast; a missing API key is not an error here — it becomes a
//! construction error when a provider client is actually built.

use std::error::Error;
use std::fmt;

/// Default similarity threshold above which a new product is rejected
/// as a duplicate.
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.90;

/// Default chat model used for attribute extraction.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Configuration consumed from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Credential for the embedding/chat provider; `None` when unset.
    pub openai_api_key: Option<String>,
    /// Similarity threshold for the duplicate gate, in `[0, 1]`.
    pub duplicate_threshold: f64,
    /// Chat model for attribute extraction.
    pub chat_model: String,
    /// Embedding model for the duplicate gate.
    pub embedding_model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `OPENAI_API_KEY` and
    /// `PRODUCT_DUPLICATE_THRESHOLD`, falling back to defaults for
    /// anything unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the threshold is present but not
    /// a number in `[0, 1]`.
    pub fn from_env() -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        // An empty key means "no credential", same as unset.
        settings.openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        if let Ok(raw) = std::env::var("PRODUCT_DUPLICATE_THRESHOLD") {
            settings.duplicate_threshold = parse_threshold(&raw)?;
        }

        Ok(settings)
    }
}

fn parse_threshold(raw: &str) -> Result<f64, SettingsError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue {
            field: "PRODUCT_DUPLICATE_THRESHOLD".to_string(),
            value: raw.to_string(),
            reason: "not a number".to_string(),
        })?;

    if !(0.0..=1.0).contains(&value) {
        return Err(SettingsError::OutOfRange {
            field: "PRODUCT_DUPLICATE_THRESHOLD".to_string(),
            min: 0.0,
            max: 1.0,
            value,
        });
    }

    Ok(value)
}

/// Operator-facing configuration errors.
#[derive(Debug, Clone)]
pub enum SettingsError {
    /// Value could not be parsed at all.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Value parsed but lies outside the allowed range.
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidValue { field, value, reason } => {
                write!(f, "{} has invalid value {:?}: {}", field, value, reason)
            }
            SettingsError::OutOfRange { field, min, max, value } => {
                write!(f, "{} must be between {} and {}, got {}", field, min, max, value)
            }
        }
    }
}

impl Error for SettingsError {}
