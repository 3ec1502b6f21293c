//! Completion provider value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidProviderError;

/// All available providers
pub const ALL_PROVIDERS: &[Provider] = &[Provider::Groq, Provider::Gemini];

/// Backend that serves both transcription and text completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    #[default]
    Groq,
    Gemini,
}

impl Provider {
    /// Get the human-readable label for this provider
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Groq => "Groq Cloud",
            Self::Gemini => "Google Gemini",
        }
    }

    /// Get the string identifier for this provider
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::Gemini => "gemini",
        }
    }

    /// Environment variable holding this provider's API key
    pub const fn api_key_env(&self) -> &'static str {
        match self {
            Self::Groq => "GROQ_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Config key holding this provider's API key
    pub const fn api_key_config_key(&self) -> &'static str {
        match self {
            Self::Groq => "groq_api_key",
            Self::Gemini => "gemini_api_key",
        }
    }
}

impl FromStr for Provider {
    type Err = InvalidProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "gemini" => Ok(Self::Gemini),
            _ => Err(InvalidProviderError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
