//! Groq Whisper transcriber adapter

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::config::DEFAULT_GROQ_TRANSCRIPTION_MODEL;
use crate::domain::transcription::{AudioData, Transcript};
use crate::infrastructure::completion::GROQ_API_BASE_URL;
use crate::infrastructure::http;

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    duration: Option<f64>,
}

/// Speech-to-text through Groq's Whisper endpoint
pub struct GroqWhisperTranscriber {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GroqWhisperTranscriber {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GROQ_TRANSCRIPTION_MODEL.to_string(),
            base_url: GROQ_API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_url(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'))
    }

    fn build_form(
        &self,
        audio: &AudioData,
        language_hint: Option<&str>,
    ) -> Result<Form, TranscriptionError> {
        let file = Part::bytes(audio.data().to_vec())
            .file_name(audio.file_name())
            .mime_str(audio.mime_type().as_str())
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let form = Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("temperature", "0");

        Ok(match language_hint {
            Some(language) => form.text("language", language.to_string()),
            None => form,
        })
    }
}

#[async_trait]
impl Transcriber for GroqWhisperTranscriber {
    async fn transcribe(
        &self,
        audio: &AudioData,
        language_hint: Option<&str>,
    ) -> Result<Transcript, TranscriptionError> {
        debug!(
            model = %self.model,
            size = %audio.human_readable_size(),
            language = language_hint.unwrap_or("auto"),
            "groq transcription request"
        );

        let response = http::send(
            self.client
                .post(self.api_url())
                .bearer_auth(&self.api_key)
                .multipart(self.build_form(audio, language_hint)?),
        )
        .await?;

        let body: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        let text = body.text.trim();
        if text.is_empty() {
            return Err(TranscriptionError::EmptyResponse);
        }

        Ok(Transcript::new(text, body.duration))
    }
}
