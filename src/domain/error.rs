//! Domain error types

use thiserror::Error;

/// Error when an unknown completion provider is requested
#[derive(Debug, Clone, Error)]
#[error("Invalid provider: \"{input}\". Valid providers are: groq, gemini")]
pub struct InvalidProviderError {
    pub input: String,
}

/// Error when an audio file has an extension no transcription backend accepts
#[derive(Debug, Clone, Error)]
#[error("Unsupported audio format: \"{input}\". Supported formats are: mp3, wav, m4a, ogg, flac, webm")]
pub struct UnsupportedAudioError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_key() {
        let err = ConfigError::ValidationError {
            key: "groq_api_key".to_string(),
            message: "missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'groq_api_key': missing"
        );
    }

    #[test]
    fn unsupported_audio_lists_formats() {
        let err = UnsupportedAudioError {
            input: "aiff".to_string(),
        };
        assert!(err.to_string().contains("m4a"));
        assert!(err.to_string().contains("\"aiff\""));
    }
}
