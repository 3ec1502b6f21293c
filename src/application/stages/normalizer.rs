//! Transcript normalizer stage

use tracing::warn;

use crate::application::ports::{CompletionRequest, TextCompletion};
use crate::domain::structured::Decoded;

const INSTRUCTION: &str = r#"You clean up transcripts of spoken academic exams.

Instructions:
- Remove disfluencies and filler words (eh, um, mmm, este, o sea, like, you know)
- Remove stutters, false starts and needlessly repeated words
- Fix obvious speech-to-text artifacts (split or garbled words)
- Keep every concept, technical term and explanation the student gave
- Do NOT alter factual content and do NOT add information
- Do NOT correct the student's conceptual or factual errors; they must stay as spoken
- Keep the original language
- Output ONLY the cleaned transcript, without comments"#;

/// Removes disfluencies from a raw transcript.
///
/// Best-effort: any gateway failure or empty answer yields the raw
/// transcript unchanged, reported as a fallback.
pub struct TranscriptNormalizer<'a, G: TextCompletion + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: TextCompletion + ?Sized> TranscriptNormalizer<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub(crate) fn build_request(raw_transcript: &str) -> CompletionRequest {
        CompletionRequest::new(
            INSTRUCTION,
            format!("Clean this transcript:\n\n{}", raw_transcript),
        )
        .temperature(0.3)
        .max_output_tokens(2000)
    }

    pub async fn normalize(&self, raw_transcript: &str) -> Decoded<String> {
        let request = Self::build_request(raw_transcript);
        let identity = |reason: String| Decoded::Fallback {
            value: raw_transcript.to_string(),
            raw: String::new(),
            reason,
        };

        match self.gateway.complete(&request).await {
            Ok(text) if !text.trim().is_empty() => Decoded::Parsed(text.trim().to_string()),
            Ok(_) => identity("normalizer returned no text".to_string()),
            Err(e) => {
                warn!(error = %e, "normalization failed, keeping raw transcript");
                identity(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stages::testing::ScriptedGateway;
    use crate::application::ports::GatewayError;

    #[test]
    fn instruction_preserves_errors() {
        let request = TranscriptNormalizer::<ScriptedGateway>::build_request("eh la fotosintesis");
        assert!(request.system.contains("Do NOT correct"));
        assert!(request.user.ends_with("eh la fotosintesis"));
        assert_eq!(request.max_output_tokens, 2000);
    }

    #[tokio::test]
    async fn returns_cleaned_text() {
        let gateway = ScriptedGateway::new(["  la fotosintesis ocurre en los cloroplastos \n"]);
        let result = TranscriptNormalizer::new(&gateway)
            .normalize("eh la fotosintesis mmm ocurre en los cloroplastos")
            .await;
        assert_eq!(
            result,
            Decoded::Parsed("la fotosintesis ocurre en los cloroplastos".to_string())
        );
    }

    #[tokio::test]
    async fn gateway_failure_degrades_to_identity() {
        let gateway = ScriptedGateway::failing(GatewayError::RateLimited);
        let result = TranscriptNormalizer::new(&gateway).normalize("eh hola").await;
        assert!(result.is_fallback());
        assert_eq!(result.into_value(), "eh hola");
    }

    #[tokio::test]
    async fn blank_answer_degrades_to_identity() {
        let gateway = ScriptedGateway::new(["   "]);
        let result = TranscriptNormalizer::new(&gateway).normalize("eh hola").await;
        assert_eq!(result.into_value(), "eh hola");
    }
}
