//! Groq chat-completion gateway (OpenAI-compatible API)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ports::{CompletionRequest, GatewayError, TextCompletion};
use crate::domain::config::DEFAULT_GROQ_LLM_MODEL;
use crate::infrastructure::http;

/// Groq OpenAI-compatible API base URL
pub(crate) const GROQ_API_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Chat completions served by Groq
pub struct GroqCompletion {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GroqCompletion {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GROQ_LLM_MODEL.to_string(),
            base_url: GROQ_API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the gateway at another OpenAI-compatible host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        }
    }

    fn extract_text(response: ChatResponse) -> Option<String> {
        response
            .choices
            .into_iter()
            .next()?
            .message?
            .content
            .filter(|text| !text.trim().is_empty())
    }
}

#[async_trait]
impl TextCompletion for GroqCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        debug!(model = %self.model, temperature = request.temperature, "groq chat request");

        let response = http::send(
            self.client
                .post(self.api_url())
                .bearer_auth(&self.api_key)
                .json(&self.build_request(request)),
        )
        .await?;

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::ParseError(e.to_string()))?;

        Self::extract_text(response).ok_or(GatewayError::EmptyResponse)
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }
}
