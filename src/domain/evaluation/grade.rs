//! Grade value object and the default weighting policy

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;
use super::concept_model::ConceptModel;
use super::labels::Confidence;
use super::matching::ConceptMatcher;

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 10.0;

/// Grade assigned when nothing numeric could be recovered
pub const FALLBACK_GRADE: f64 = 5.0;

/// Points earned on one rubric criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: String,
    #[serde(default)]
    pub points_awarded: f64,
    #[serde(default)]
    pub points_possible: f64,
    #[serde(default)]
    pub justification: String,
}

/// A penalty or bonus applied on top of the criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub reason: String,
    #[serde(default)]
    pub points: f64,
}

/// Final grade with its breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    pub final_grade: f64,
    #[serde(default)]
    pub per_criterion_breakdown: Vec<CriterionScore>,
    #[serde(default)]
    pub penalties: Vec<Adjustment>,
    #[serde(default)]
    pub bonuses: Vec<Adjustment>,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub general_justification: String,
}

impl GradeResult {
    /// Grade recovered from unstructured text; always low confidence
    pub fn recovered(grade: f64) -> Self {
        Self {
            final_grade: clamp_grade(grade),
            per_criterion_breakdown: Vec::new(),
            penalties: Vec::new(),
            bonuses: Vec::new(),
            confidence: Confidence::Low,
            general_justification: format!(
                "Structured grading output was unusable; grade {:.1} was read from the raw response text.",
                clamp_grade(grade)
            ),
        }
    }

    /// Neutral grade used when no number could be recovered
    pub fn fallback() -> Self {
        Self {
            final_grade: FALLBACK_GRADE,
            per_criterion_breakdown: Vec::new(),
            penalties: Vec::new(),
            bonuses: Vec::new(),
            confidence: Confidence::Low,
            general_justification:
                "Structured grading output was unusable and contained no grade; a neutral 5.0 was assigned and needs manual review."
                    .to_string(),
        }
    }

    /// Clamp and round a parsed grade; a parsed grade is never low confidence
    pub(crate) fn normalized(mut self) -> Self {
        self.final_grade = clamp_grade(self.final_grade);
        if self.confidence == Confidence::Low {
            self.confidence = Confidence::Medium;
        }
        self
    }
}

/// Clamp to [0, 10] and round to one decimal
pub fn clamp_grade(grade: f64) -> f64 {
    if grade.is_nan() {
        return FALLBACK_GRADE;
    }
    (grade.clamp(MIN_GRADE, MAX_GRADE) * 10.0).round() / 10.0
}

/// Weighting applied when the rubric is absent or unusable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultWeighting {
    pub principal: f64,
    pub secondary: f64,
    pub no_severe_errors: f64,
    pub clarity_coherence: f64,
    pub vocabulary: f64,
    pub severe_error_penalty: f64,
    pub fabrication_penalty: f64,
}

impl Default for DefaultWeighting {
    fn default() -> Self {
        Self {
            principal: 4.0,
            secondary: 2.0,
            no_severe_errors: 2.0,
            clarity_coherence: 1.0,
            vocabulary: 1.0,
            severe_error_penalty: 1.0,
            fabrication_penalty: 0.5,
        }
    }
}

impl DefaultWeighting {
    /// Policy text handed to the grading backend
    pub fn describe(&self) -> String {
        format!(
            "- Principal concepts: {:.0}%\n\
             - Secondary concepts: {:.0}%\n\
             - Absence of severe errors: {:.0}%\n\
             - Clarity and coherence: {:.0}%\n\
             - Technical vocabulary: {:.0}%\n\
             - Penalty: -{} point per severe error\n\
             - Penalty: -{} points per fabricated claim\n\
             - Final grade clamped to [0, 10]",
            self.principal * 10.0,
            self.secondary * 10.0,
            self.no_severe_errors * 10.0,
            self.clarity_coherence * 10.0,
            self.vocabulary * 10.0,
            self.severe_error_penalty,
            self.fabrication_penalty,
        )
    }

    /// Grade this weighting yields for an analysis, before any rubric applies
    pub fn baseline(
        &self,
        model: &ConceptModel,
        analysis: &AnalysisResult,
        matcher: &ConceptMatcher,
    ) -> f64 {
        let share = |concepts: &[String]| {
            if concepts.is_empty() {
                return 1.0;
            }
            let hits = concepts
                .iter()
                .filter(|c| matcher.any_matches(c, &analysis.correct_concepts))
                .count();
            hits as f64 / concepts.len() as f64
        };

        let severe = analysis.severe_error_count();
        let communication = (analysis.clarity.weight() + analysis.coherence.weight()) / 2.0;

        let mut grade = self.principal * share(&model.principal_concepts)
            + self.secondary * share(&model.secondary_concepts)
            + if severe == 0 { self.no_severe_errors } else { 0.0 }
            + self.clarity_coherence * communication
            + self.vocabulary * analysis.technical_vocabulary.weight();
        grade -= self.severe_error_penalty * severe as f64;
        grade -= self.fabrication_penalty * analysis.fabricated_claims.len() as f64;
        clamp_grade(grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::analysis::FactualError;
    use crate::domain::evaluation::labels::{QualityRating, Severity};

    fn model() -> ConceptModel {
        ConceptModel {
            principal_concepts: vec!["fase luminosa".into(), "ciclo de Calvin".into()],
            secondary_concepts: vec!["estomas".into()],
            ..ConceptModel::fallback()
        }
    }

    #[test]
    fn clamp_grade_bounds_and_rounds() {
        assert_eq!(clamp_grade(11.0), 10.0);
        assert_eq!(clamp_grade(-2.0), 0.0);
        assert_eq!(clamp_grade(7.46), 7.5);
        assert_eq!(clamp_grade(f64::NAN), FALLBACK_GRADE);
    }

    #[test]
    fn normalized_never_reports_low_confidence() {
        let grade = GradeResult {
            final_grade: 12.0,
            confidence: Confidence::Low,
            ..GradeResult::fallback()
        }
        .normalized();
        assert_eq!(grade.final_grade, 10.0);
        assert_eq!(grade.confidence, Confidence::Medium);
    }

    #[test]
    fn fallback_is_neutral_and_low() {
        let grade = GradeResult::fallback();
        assert_eq!(grade.final_grade, 5.0);
        assert_eq!(grade.confidence, Confidence::Low);
        assert!(grade.general_justification.contains("manual review"));
    }

    #[test]
    fn recovered_is_low_confidence() {
        let grade = GradeResult::recovered(7.5);
        assert_eq!(grade.final_grade, 7.5);
        assert_eq!(grade.confidence, Confidence::Low);
    }

    #[test]
    fn decodes_minimal_grade() {
        let grade: GradeResult = serde_json::from_str(r#"{"final_grade": 8}"#).unwrap();
        assert_eq!(grade.final_grade, 8.0);
        assert_eq!(grade.confidence, Confidence::Medium);
    }

    #[test]
    fn describe_lists_weights() {
        let text = DefaultWeighting::default().describe();
        assert!(text.contains("Principal concepts: 40%"));
        assert!(text.contains("Secondary concepts: 20%"));
        assert!(text.contains("-0.5 points per fabricated claim"));
    }

    #[test]
    fn baseline_perfect_answer() {
        let analysis = AnalysisResult {
            correct_concepts: vec!["fase luminosa".into(), "ciclo de Calvin".into(), "estomas".into()],
            clarity: QualityRating::Excellent,
            coherence: QualityRating::Excellent,
            technical_vocabulary: QualityRating::Excellent,
            ..AnalysisResult::fallback()
        };
        let grade = DefaultWeighting::default().baseline(&model(), &analysis, &ConceptMatcher::default());
        assert_eq!(grade, 10.0);
    }

    #[test]
    fn baseline_applies_penalties() {
        let analysis = AnalysisResult {
            correct_concepts: vec!["fase luminosa".into(), "ciclo de Calvin".into()],
            factual_errors: vec![FactualError {
                description: "mitochondria instead of chloroplast".into(),
                severity: Severity::Severe,
                student_quote: "ocurre en las mitocondrias".into(),
            }],
            fabricated_claims: vec!["invented date".into()],
            ..AnalysisResult::fallback()
        };
        // 4 + 0 + 0 + 0.5 + 0.5 - 1 - 0.5
        let grade = DefaultWeighting::default().baseline(&model(), &analysis, &ConceptMatcher::default());
        assert_eq!(grade, 3.5);
    }
}
