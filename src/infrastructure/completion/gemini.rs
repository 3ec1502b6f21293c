//! Gemini text-completion gateway

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{CompletionRequest, GatewayError, TextCompletion};
use crate::domain::config::DEFAULT_GEMINI_MODEL;
use crate::infrastructure::gemini_api::{
    generate_content_url, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part, SystemInstruction, API_BASE_URL,
};
use crate::infrastructure::http;

/// Text completions served by the Gemini API
pub struct GeminiCompletion {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiCompletion {
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

    fn build_request(request: &CompletionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::text(request.user.clone())],
            }],
            system_instruction: Some(SystemInstruction::text(request.system.clone())),
            generation_config: Some(GenerationConfig {
                temperature: Some(request.temperature),
                max_output_tokens: Some(request.max_output_tokens),
            }),
        }
    }
}

#[async_trait]
impl TextCompletion for GeminiCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        debug!(model = %self.model, temperature = request.temperature, "gemini completion request");

        let response = http::send(
            self.client
                .post(self.api_url())
                .json(&Self::build_request(request)),
        )
        .await?;

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(GatewayError::ApiError(error.message));
        }

        response
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
