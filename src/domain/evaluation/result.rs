//! Assembled evaluation and its output envelope

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;
use super::concept_model::ConceptModel;
use super::feedback::FeedbackBundle;
use super::grade::GradeResult;
use super::labels::{Difficulty, Subject};
use super::matching::ConceptMatcher;
use crate::domain::transcription::word_count;

/// The complete evaluation of one oral exam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub original_transcript: String,
    pub normalized_transcript: String,
    pub audio_duration_seconds: Option<f64>,
    pub word_count: usize,
    pub detected_subject: Subject,
    pub difficulty_level: Difficulty,
    pub coverage_percentage: f64,
    pub concept_model: ConceptModel,
    pub analysis: AnalysisResult,
    pub grade: GradeResult,
    pub feedback: FeedbackBundle,
}

impl EvaluationResult {
    /// Assemble the final result from every stage's output
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        original_transcript: String,
        normalized_transcript: String,
        audio_duration_seconds: Option<f64>,
        concept_model: ConceptModel,
        analysis: AnalysisResult,
        grade: GradeResult,
        feedback: FeedbackBundle,
        matcher: &ConceptMatcher,
    ) -> Self {
        let coverage_percentage = matcher.coverage(
            &concept_model.principal_concepts,
            &concept_model.secondary_concepts,
            &analysis.correct_concepts,
        );
        Self {
            word_count: word_count(&normalized_transcript),
            original_transcript,
            normalized_transcript,
            audio_duration_seconds,
            detected_subject: concept_model.detected_subject,
            difficulty_level: concept_model.difficulty_level,
            coverage_percentage,
            concept_model,
            analysis,
            grade,
            feedback,
        }
    }
}

/// What the caller receives: a full evaluation or a single error, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl EvaluationEnvelope {
    pub fn success(evaluation: EvaluationResult, raw_response: Option<String>) -> Self {
        Self {
            success: true,
            evaluation: Some(evaluation),
            error: None,
            raw_response,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            evaluation: None,
            error: Some(error.into()),
            raw_response: None,
        }
    }
}
