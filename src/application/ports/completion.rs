//! Text-completion port interface

use async_trait::async_trait;
use thiserror::Error;

/// Text-completion gateway errors
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty completion response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// One prompt for the completion backend
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.2,
            max_output_tokens: 2000,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// Port for text generation.
///
/// Implementations perform exactly one backend call per `complete` and
/// never retry.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Complete the prompt and return the generated text.
    ///
    /// # Returns
    /// Non-empty completion text, or an error when the backend is
    /// unreachable, rejects the request, or returns nothing
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;

    /// Short identifier of the backend, for logs
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: TextCompletion + ?Sized> TextCompletion for Box<T> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        (**self).complete(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: TextCompletion + ?Sized> TextCompletion for &T {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        (**self).complete(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
