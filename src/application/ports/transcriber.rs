//! Transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::{AudioData, Transcript};

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty transcription response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for audio transcription
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an exam recording to text.
    ///
    /// # Arguments
    /// * `audio` - The recorded answer
    /// * `language_hint` - Optional ISO-639-1 language of the speech
    ///
    /// # Returns
    /// The transcript with its duration when the backend reports it
    async fn transcribe(
        &self,
        audio: &AudioData,
        language_hint: Option<&str>,
    ) -> Result<Transcript, TranscriptionError>;
}

#[async_trait]
impl<T: Transcriber + ?Sized> Transcriber for Box<T> {
    async fn transcribe(
        &self,
        audio: &AudioData,
        language_hint: Option<&str>,
    ) -> Result<Transcript, TranscriptionError> {
        (**self).transcribe(audio, language_hint).await
    }
}
