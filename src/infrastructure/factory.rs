//! Provider selection for the completion gateway and the transcriber

use crate::application::ports::{TextCompletion, Transcriber};
use crate::domain::config::{AppConfig, Provider};
use crate::domain::error::ConfigError;

use super::completion::{GeminiCompletion, GroqCompletion};
use super::transcription::{GeminiTranscriber, GroqWhisperTranscriber};

fn require_api_key(provider: Provider, config: &AppConfig) -> Result<String, ConfigError> {
    config
        .api_key_for(provider)
        .map(str::to_string)
        .ok_or_else(|| ConfigError::ValidationError {
            key: provider.api_key_config_key().to_string(),
            message: format!(
                "no API key for {}. Set {} or run: oral-eval config set {} <key>",
                provider.label(),
                provider.api_key_env(),
                provider.api_key_config_key()
            ),
        })
}

/// Create the completion gateway for a provider.
///
/// Fails with [`ConfigError::ValidationError`] when the provider's API key
/// is missing, before any network call is made.
pub fn create_gateway(
    provider: Provider,
    config: &AppConfig,
) -> Result<Box<dyn TextCompletion>, ConfigError> {
    let api_key = require_api_key(provider, config)?;
    let model = config.llm_model_or_default(provider);

    Ok(match provider {
        Provider::Groq => Box::new(GroqCompletion::new(api_key).with_model(model)),
        Provider::Gemini => Box::new(GeminiCompletion::new(api_key).with_model(model)),
    })
}

/// Create the transcriber for a provider.
pub fn create_transcriber(
    provider: Provider,
    config: &AppConfig,
) -> Result<Box<dyn Transcriber>, ConfigError> {
    let api_key = require_api_key(provider, config)?;
    let model = config.transcription_model_or_default(provider);

    Ok(match provider {
        Provider::Groq => Box::new(GroqWhisperTranscriber::new(api_key).with_model(model)),
        Provider::Gemini => Box::new(GeminiTranscriber::new(api_key).with_model(model)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_validation_error() {
        let result = create_gateway(Provider::Groq, &AppConfig::defaults());
        match result {
            Err(ConfigError::ValidationError { key, message }) => {
                assert_eq!(key, "groq_api_key");
                assert!(message.contains("GROQ_API_KEY"));
            }
            _ => panic!("expected a validation error"),
        }
    }

    #[test]
    fn blank_key_is_missing() {
        let config = AppConfig {
            gemini_api_key: Some("  ".to_string()),
            ..AppConfig::defaults()
        };
        assert!(create_transcriber(Provider::Gemini, &config).is_err());
    }

    #[test]
    fn builds_selected_provider() {
        let config = AppConfig {
            groq_api_key: Some("g".to_string()),
            gemini_api_key: Some("m".to_string()),
            ..AppConfig::defaults()
        };
        assert_eq!(
            create_gateway(Provider::Groq, &config).unwrap().provider_name(),
            "groq"
        );
        assert_eq!(
            create_gateway(Provider::Gemini, &config).unwrap().provider_name(),
            "gemini"
        );
        assert!(create_transcriber(Provider::Groq, &config).is_ok());
    }
}
