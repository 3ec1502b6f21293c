//! Application configuration value object

use serde::{Deserialize, Serialize};

use super::provider::Provider;
use crate::domain::error::InvalidProviderError;

/// Default chat model served by Groq
pub const DEFAULT_GROQ_LLM_MODEL: &str = "llama-3.3-70b-versatile";

/// Default speech-to-text model served by Groq
pub const DEFAULT_GROQ_TRANSCRIPTION_MODEL: &str = "whisper-large-v3";

/// Default Gemini model, used for both transcription and completion
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub provider: Option<String>,
    pub groq_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub llm_model: Option<String>,
    pub transcription_model: Option<String>,
    pub language: Option<String>,
    pub normalize: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            provider: Some("groq".to_string()),
            groq_api_key: None,
            gemini_api_key: None,
            llm_model: None,
            transcription_model: None,
            language: None,
            normalize: Some(true),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            provider: other.provider.or(self.provider),
            groq_api_key: other.groq_api_key.or(self.groq_api_key),
            gemini_api_key: other.gemini_api_key.or(self.gemini_api_key),
            llm_model: other.llm_model.or(self.llm_model),
            transcription_model: other.transcription_model.or(self.transcription_model),
            language: other.language.or(self.language),
            normalize: other.normalize.or(self.normalize),
        }
    }

    /// Selected provider; the default when unset, an error when unrecognized
    pub fn selected_provider(&self) -> Result<Provider, InvalidProviderError> {
        self.provider
            .as_deref()
            .map_or(Ok(Provider::default()), str::parse)
    }

    /// API key for the given provider, ignoring empty strings
    pub fn api_key_for(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::Groq => self.groq_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
    }

    /// Completion model for the given provider
    pub fn llm_model_or_default(&self, provider: Provider) -> &str {
        self.llm_model.as_deref().unwrap_or(match provider {
            Provider::Groq => DEFAULT_GROQ_LLM_MODEL,
            Provider::Gemini => DEFAULT_GEMINI_MODEL,
        })
    }

    /// Transcription model for the given provider
    pub fn transcription_model_or_default(&self, provider: Provider) -> &str {
        self.transcription_model.as_deref().unwrap_or(match provider {
            Provider::Groq => DEFAULT_GROQ_TRANSCRIPTION_MODEL,
            Provider::Gemini => DEFAULT_GEMINI_MODEL,
        })
    }

    /// Language hint for the transcriber, if any
    pub fn language_hint(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.trim().is_empty())
    }

    /// Get normalize setting, or true if not set
    pub fn normalize_or_default(&self) -> bool {
        self.normalize.unwrap_or(true)
    }
}
