//! Grading calculator stage

use tracing::{debug, warn};

use super::analyzer::bullet_list;
use crate::application::ports::{CompletionRequest, GatewayError, TextCompletion};
use crate::domain::evaluation::{
    AnalysisResult, ConceptMatcher, ConceptModel, DefaultWeighting, GradeResult,
};
use crate::domain::structured::{decode_or_else, extract_grade, Decoded};

const INSTRUCTION: &str = r#"You are an impartial academic grader. Grade a student's oral exam from 0 to 10 using the concept model, the analysis of the answer and the teacher's rubric.

Grading policy:
- Prefer the teacher's rubric: use its criteria and point values for the breakdown.
- If the rubric is missing or unusable, apply the default weighting below.
- Factual errors and fabricated claims must lower the grade as stated in the penalties.
- The final grade must be a number between 0 and 10.

Respond ONLY with a JSON object with exactly these keys:
{
  "final_grade": 0.0,
  "per_criterion_breakdown": [{"criterion": "...", "points_awarded": 0.0, "points_possible": 0.0, "justification": "..."}],
  "penalties": [{"reason": "...", "points": 0.0}],
  "bonuses": [{"reason": "...", "points": 0.0}],
  "confidence": "high | medium | low",
  "general_justification": "..."
}
Do not add commentary before or after the JSON."#;

/// Combines the concept model, the analysis and the rubric into a grade.
pub struct GradingCalculator<'a, G: TextCompletion + ?Sized> {
    gateway: &'a G,
    matcher: ConceptMatcher,
    weighting: DefaultWeighting,
}

impl<'a, G: TextCompletion + ?Sized> GradingCalculator<'a, G> {
    pub fn new(gateway: &'a G, matcher: ConceptMatcher) -> Self {
        Self {
            gateway,
            matcher,
            weighting: DefaultWeighting::default(),
        }
    }

    pub(crate) fn build_request(
        &self,
        model: &ConceptModel,
        analysis: &AnalysisResult,
        rubric: &str,
    ) -> CompletionRequest {
        let rubric = if rubric.trim().is_empty() {
            "(no rubric supplied: apply the default weighting)".to_string()
        } else {
            rubric.trim().to_string()
        };
        let analysis_json = serde_json::to_string_pretty(analysis).unwrap_or_default();
        let baseline = self.weighting.baseline(model, analysis, &self.matcher);

        let user = format!(
            "TEACHER RUBRIC:\n<<<\n{}\n>>>\n\n\
             DEFAULT WEIGHTING:\n{}\n\n\
             PRINCIPAL CONCEPTS:\n{}\n\n\
             SECONDARY CONCEPTS:\n{}\n\n\
             ANALYSIS OF THE ANSWER:\n{}\n\n\
             The default weighting alone yields {:.1}/10 for this analysis. \
             Use it as a reference point, not as the answer.",
            rubric,
            self.weighting.describe(),
            bullet_list(&model.principal_concepts),
            bullet_list(&model.secondary_concepts),
            analysis_json,
            baseline,
        );
        CompletionRequest::new(INSTRUCTION, user)
            .temperature(0.1)
            .max_output_tokens(1500)
    }

    /// Grade the answer.
    ///
    /// Malformed output falls back in two tiers: a grade read from the raw
    /// text, else [`GradeResult::fallback`]. Both tiers report low confidence.
    pub async fn grade(
        &self,
        model: &ConceptModel,
        analysis: &AnalysisResult,
        rubric: &str,
    ) -> Result<Decoded<GradeResult>, GatewayError> {
        let raw = self
            .gateway
            .complete(&self.build_request(model, analysis, rubric))
            .await?;

        let decoded = match decode_or_else(&raw, recover_grade) {
            Decoded::Parsed(grade) => Decoded::Parsed(grade.normalized()),
            fallback => fallback,
        };
        match &decoded {
            Decoded::Parsed(grade) => debug!(grade = grade.final_grade, "grade calculated"),
            Decoded::Fallback { value, .. } => {
                warn!(grade = value.final_grade, "grade recovered from unstructured output")
            }
        }
        Ok(decoded)
    }
}

/// Second-tier fallback: read the grade from text, else the neutral default
fn recover_grade(raw: &str) -> GradeResult {
    extract_grade(raw)
        .map(GradeResult::recovered)
        .unwrap_or_else(GradeResult::fallback)
}
