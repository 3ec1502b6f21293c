//! Feedback generator stage

use crate::application::ports::{CompletionRequest, GatewayError, TextCompletion};
use crate::domain::evaluation::{AnalysisResult, ConceptModel, FeedbackBundle, GradeResult};
use crate::domain::structured::{decode_or, Decoded};

const INSTRUCTION: &str = r#"You are an encouraging but honest teacher writing feedback on an oral exam.

Guidelines:
- Start with the student's real strengths
- Explain each error pedagogically: what the student said, what is correct, and why
- Give concrete study recommendations tied to the omitted concepts and errors
- Adapt the tone to the student's apparent level and the difficulty of the material
- Write in the language of the student's answer
- Also write a short private note for the teacher

Respond ONLY with a JSON object with exactly these keys:
{
  "student_feedback": {
    "summary": "...",
    "strengths": ["..."],
    "improvement_areas": ["..."],
    "corrected_errors": [{"said": "...", "correct": "...", "why": "..."}],
    "study_recommendations": ["..."],
    "motivational_message": "..."
  },
  "teacher_note": {
    "observations": "...",
    "error_pattern": "...",
    "reinforcement_suggestion": "...",
    "comparison_to_expected": "..."
  }
}
Do not add commentary before or after the JSON."#;

/// Writes student and teacher feedback from the analysis and grade.
pub struct FeedbackGenerator<'a, G: TextCompletion + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: TextCompletion + ?Sized> FeedbackGenerator<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub(crate) fn build_request(
        analysis: &AnalysisResult,
        grade: &GradeResult,
        model: &ConceptModel,
    ) -> CompletionRequest {
        let analysis_json = serde_json::to_string_pretty(analysis).unwrap_or_default();
        let user = format!(
            "SUBJECT: {} ({})\n\
             FINAL GRADE: {:.1}/10\n\
             GRADE JUSTIFICATION: {}\n\n\
             ANALYSIS OF THE ANSWER:\n{}",
            model.detected_subject,
            model.difficulty_level,
            grade.final_grade,
            grade.general_justification,
            analysis_json,
        );
        CompletionRequest::new(INSTRUCTION, user)
            .temperature(0.5)
            .max_output_tokens(2000)
    }

    /// Generate feedback; malformed output yields [`FeedbackBundle::fallback`].
    pub async fn generate(
        &self,
        analysis: &AnalysisResult,
        grade: &GradeResult,
        model: &ConceptModel,
    ) -> Result<Decoded<FeedbackBundle>, GatewayError> {
        let raw = self
            .gateway
            .complete(&Self::build_request(analysis, grade, model))
            .await?;
        Ok(decode_or(&raw, FeedbackBundle::fallback))
    }
}
