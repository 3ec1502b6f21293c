//! Gemini API transcriber adapter

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::config::DEFAULT_GEMINI_MODEL;
use crate::domain::transcription::{AudioData, Transcript};
use crate::infrastructure::gemini_api::{
    generate_content_url, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part, SystemInstruction, API_BASE_URL,
};
use crate::infrastructure::http;

const INSTRUCTION: &str = "You transcribe recordings of students answering an oral exam. \
Write down exactly what is said, word for word, in the language spoken. \
Keep hesitations and mistakes; do not correct, summarize or translate. \
Output only the transcript text.";

/// Gemini API transcriber
pub struct GeminiTranscriber {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiTranscriber {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
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
        generate_content_url(&self.base_url, &self.model, &self.api_key)
    }

    fn build_request(audio: &AudioData, language_hint: Option<&str>) -> GenerateContentRequest {
        let mut parts = vec![Part::inline(audio.mime_type().as_str(), audio.to_base64())];
        if let Some(language) = language_hint {
            parts.push(Part::text(format!("The speech is in language '{}'.", language)));
        }

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            system_instruction: Some(SystemInstruction::text(INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                temperature: Some(0.0),
                max_output_tokens: None,
            }),
        }
    }
}

#[async_trait]
impl Transcriber for GeminiTranscriber {
    async fn transcribe(
        &self,
        audio: &AudioData,
        language_hint: Option<&str>,
    ) -> Result<Transcript, TranscriptionError> {
        debug!(
            model = %self.model,
            size = %audio.human_readable_size(),
            "gemini transcription request"
        );

        let response = http::send(
            self.client
                .post(self.api_url())
                .json(&Self::build_request(audio, language_hint)),
        )
        .await?;

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(TranscriptionError::ApiError(error.message));
        }

        let text = response.text().ok_or(TranscriptionError::EmptyResponse)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranscriptionError::EmptyResponse);
        }

        // Gemini does not report the audio duration
        Ok(Transcript::new(trimmed, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transcription::AudioMimeType;
    use wiremock::matchers::{body_string_contains, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn audio() -> AudioData {
        AudioData::new(vec![1, 2, 3], AudioMimeType::Wav)
    }

    #[test]
    fn build_request_inlines_audio() {
        let request = GeminiTranscriber::build_request(&audio(), None);

        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(request.contents[0].parts.len(), 1);
        let inline = request.contents[0].parts[0].inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type, "audio/wav");
        assert_eq!(inline.data, "AQID");
        assert!(request.system_instruction.is_some());
    }

    #[test]
    fn language_hint_adds_text_part() {
        let request = GeminiTranscriber::build_request(&audio(), Some("es"));
        assert_eq!(request.contents[0].parts.len(), 2);
        assert!(request.contents[0].parts[1]
            .text
            .as_deref()
            .unwrap()
            .contains("'es'"));
    }

    #[test]
    fn custom_model_in_url() {
        let transcriber = GeminiTranscriber::new("key").with_model("custom-model");
        assert!(transcriber.api_url().contains("custom-model:generateContent"));
    }

    #[tokio::test]
    async fn returns_trimmed_transcript_without_duration() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("key", "secret"))
            .and(body_string_contains("inlineData"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": " Newton's first law... \n"}]}}]
            })))
            .mount(&server)
            .await;

        let transcriber = GeminiTranscriber::new("secret").with_base_url(server.uri());
        let transcript = transcriber.transcribe(&audio(), None).await.unwrap();
        assert_eq!(transcript.text, "Newton's first law...");
        assert!(transcript.duration_seconds.is_none());
    }

    #[tokio::test]
    async fn body_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": {"code": 500, "message": "internal", "status": "INTERNAL"}
            })))
            .mount(&server)
            .await;

        let transcriber = GeminiTranscriber::new("key").with_base_url(server.uri());
        let result = transcriber.transcribe(&audio(), None).await;
        assert!(matches!(result, Err(TranscriptionError::ApiError(msg)) if msg == "internal"));
    }
}
