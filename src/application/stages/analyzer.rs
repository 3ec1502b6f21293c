//! Response analyzer stage

use tracing::debug;

use crate::application::ports::{CompletionRequest, GatewayError, TextCompletion};
use crate::domain::evaluation::{AnalysisResult, ConceptMatcher, ConceptModel};
use crate::domain::structured::{decode_or, Decoded};

const INSTRUCTION: &str = r#"You are a rigorous academic examiner. Compare a student's spoken answer (transcribed) with the expected concepts of the reference material.

Tasks:
1. Classify every principal and secondary concept as mentioned correctly or omitted. A concept mentioned with a factual mistake is NOT correct.
2. List factual errors: statements that contradict the reference material. Tag each with a severity (mild, moderate, severe) and quote the student verbatim.
3. List fabricated claims: information the student invented that is not in the material.
4. Rate clarity, argumentative coherence and use of technical vocabulary as excellent, good, regular or deficient.
5. Extract short verbatim quotes that show real understanding.

Respond ONLY with a JSON object with exactly these keys:
{
  "correct_concepts": ["concept names exactly as listed"],
  "omitted_concepts": ["concept names exactly as listed"],
  "factual_errors": [{"description": "...", "severity": "mild | moderate | severe", "student_quote": "..."}],
  "fabricated_claims": ["..."],
  "clarity": "excellent | good | regular | deficient",
  "coherence": "excellent | good | regular | deficient",
  "technical_vocabulary": "excellent | good | regular | deficient",
  "highlighted_quotes": ["..."]
}
Do not add commentary before or after the JSON."#;

/// Compares the normalized transcript with the concept model.
pub struct ResponseAnalyzer<'a, G: TextCompletion + ?Sized> {
    gateway: &'a G,
    matcher: ConceptMatcher,
}

impl<'a, G: TextCompletion + ?Sized> ResponseAnalyzer<'a, G> {
    pub fn new(gateway: &'a G, matcher: ConceptMatcher) -> Self {
        Self { gateway, matcher }
    }

    pub(crate) fn build_request(transcript: &str, model: &ConceptModel) -> CompletionRequest {
        let user = format!(
            "SUBJECT: {}\n\n\
             PRINCIPAL CONCEPTS:\n{}\n\n\
             SECONDARY CONCEPTS:\n{}\n\n\
             SPECIFIC FACTS:\n{}\n\n\
             PROCESS RELATIONS:\n{}\n\n\
             STUDENT TRANSCRIPT:\n<<<\n{}\n>>>",
            model.detected_subject,
            bullet_list(&model.principal_concepts),
            bullet_list(&model.secondary_concepts),
            bullet_list(&model.specific_facts),
            bullet_list(&model.process_relations),
            transcript.trim(),
        );
        CompletionRequest::new(INSTRUCTION, user)
            .temperature(0.2)
            .max_output_tokens(2000)
    }

    /// Analyze the answer; malformed output yields [`AnalysisResult::fallback`].
    ///
    /// Parsed analyses are reconciled with the concept model so that every
    /// concept is either credited or omitted.
    pub async fn analyze(
        &self,
        transcript: &str,
        model: &ConceptModel,
    ) -> Result<Decoded<AnalysisResult>, GatewayError> {
        let raw = self
            .gateway
            .complete(&Self::build_request(transcript, model))
            .await?;
        let decoded = match decode_or(&raw, AnalysisResult::fallback) {
            Decoded::Parsed(analysis) => Decoded::Parsed(analysis.reconcile(model, &self.matcher)),
            fallback => fallback,
        };
        if let Decoded::Parsed(analysis) = &decoded {
            debug!(
                correct = analysis.correct_concepts.len(),
                omitted = analysis.omitted_concepts.len(),
                errors = analysis.factual_errors.len(),
                fabricated = analysis.fabricated_claims.len(),
                "answer analyzed"
            );
        }
        Ok(decoded)
    }
}

pub(crate) fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "- (none)".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stages::testing::ScriptedGateway;
    use crate::domain::evaluation::{QualityRating, Severity, Subject};

    fn model() -> ConceptModel {
        ConceptModel {
            principal_concepts: vec!["cloroplastos".into(), "fase luminosa".into()],
            secondary_concepts: vec!["oxígeno".into()],
            detected_subject: Subject::Biology,
            ..ConceptModel::fallback()
        }
    }

    #[test]
    fn request_lists_concepts_and_transcript() {
        let request =
            ResponseAnalyzer::<ScriptedGateway>::build_request("la fase luminosa ...", &model());
        assert!(request.user.contains("SUBJECT: Biology"));
        assert!(request.user.contains("- cloroplastos\n- fase luminosa"));
        assert!(request.user.contains("SPECIFIC FACTS:\n- (none)"));
        assert!(request.user.contains("<<<\nla fase luminosa ...\n>>>"));
    }

    #[tokio::test]
    async fn parses_and_reconciles() {
        let reply = r#"{
            "correct_concepts": ["fase luminosa"],
            "omitted_concepts": [],
            "factual_errors": [{"description": "Says mitochondria", "severity": "severe", "student_quote": "en las mitocondrias"}],
            "fabricated_claims": [],
            "clarity": "good",
            "coherence": "regular",
            "technical_vocabulary": "deficient",
            "highlighted_quotes": ["se libera oxigeno"]
        }"#;
        let gateway = ScriptedGateway::new([reply]);
        let decoded = ResponseAnalyzer::new(&gateway, ConceptMatcher::default())
            .analyze("...", &model())
            .await
            .unwrap();

        let analysis = decoded.into_value();
        assert_eq!(analysis.omitted_concepts, vec!["cloroplastos", "oxígeno"]);
        assert_eq!(analysis.factual_errors[0].severity, Severity::Severe);
        assert_eq!(analysis.technical_vocabulary, QualityRating::Deficient);
    }

    #[tokio::test]
    async fn malformed_reply_falls_back_unreconciled() {
        let gateway = ScriptedGateway::new([r#"{"correct_concepts": ["fase luminosa"],"#]);
        let decoded = ResponseAnalyzer::new(&gateway, ConceptMatcher::default())
            .analyze("...", &model())
            .await
            .unwrap();

        assert!(decoded.is_fallback());
        assert_eq!(decoded.into_value(), AnalysisResult::fallback());
    }

    #[tokio::test]
    async fn gateway_error_propagates() {
        let gateway = ScriptedGateway::failing(GatewayError::RequestFailed("timeout".into()));
        let result = ResponseAnalyzer::new(&gateway, ConceptMatcher::default())
            .analyze("...", &model())
            .await;
        assert!(result.is_err());
    }
}
