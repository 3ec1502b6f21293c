//! Shared HTTP status handling for the provider adapters

use reqwest::StatusCode;

use crate::application::ports::{GatewayError, TranscriptionError};

/// Why a provider call failed, before it is mapped onto a port error
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HttpFailure {
    InvalidApiKey,
    RateLimited,
    Transport(String),
    Api(String),
}

impl HttpFailure {
    /// Classify a non-success response.
    ///
    /// Gemini reports a bad key as a 400 with "API key not valid" in the body.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::InvalidApiKey,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            StatusCode::BAD_REQUEST if body.contains("API key not valid") => Self::InvalidApiKey,
            _ => Self::Api(format!("HTTP {}: {}", status, body.trim())),
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<HttpFailure> for GatewayError {
    fn from(failure: HttpFailure) -> Self {
        match failure {
            HttpFailure::InvalidApiKey => GatewayError::InvalidApiKey,
            HttpFailure::RateLimited => GatewayError::RateLimited,
            HttpFailure::Transport(msg) => GatewayError::RequestFailed(msg),
            HttpFailure::Api(msg) => GatewayError::ApiError(msg),
        }
    }
}

impl From<HttpFailure> for TranscriptionError {
    fn from(failure: HttpFailure) -> Self {
        match failure {
            HttpFailure::InvalidApiKey => TranscriptionError::InvalidApiKey,
            HttpFailure::RateLimited => TranscriptionError::RateLimited,
            HttpFailure::Transport(msg) => TranscriptionError::RequestFailed(msg),
            HttpFailure::Api(msg) => TranscriptionError::ApiError(msg),
        }
    }
}

/// Send a prepared request and hand back the successful response.
pub(crate) async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, HttpFailure> {
    let response = request.send().await.map_err(HttpFailure::from_transport)?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(HttpFailure::from_status(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_map_to_invalid_key() {
        assert_eq!(
            HttpFailure::from_status(StatusCode::UNAUTHORIZED, ""),
            HttpFailure::InvalidApiKey
        );
        assert_eq!(
            HttpFailure::from_status(StatusCode::FORBIDDEN, ""),
            HttpFailure::InvalidApiKey
        );
    }

    #[test]
    fn gemini_bad_key_is_a_400() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key."}}"#;
        assert_eq!(
            HttpFailure::from_status(StatusCode::BAD_REQUEST, body),
            HttpFailure::InvalidApiKey
        );
    }

    #[test]
    fn other_statuses_keep_body() {
        let failure = HttpFailure::from_status(StatusCode::INTERNAL_SERVER_ERROR, " boom \n");
        assert_eq!(
            failure,
            HttpFailure::Api("HTTP 500 Internal Server Error: boom".to_string())
        );
    }

    #[test]
    fn maps_onto_both_port_errors() {
        assert!(matches!(
            GatewayError::from(HttpFailure::RateLimited),
            GatewayError::RateLimited
        ));
        assert!(matches!(
            TranscriptionError::from(HttpFailure::Transport("x".into())),
            TranscriptionError::RequestFailed(_)
        ));
    }
}
