//! Evaluation domain module
//!
//! The data model produced by the pipeline stages, plus the pure algorithms
//! that need no backend: concept matching, coverage and the default weighting.

mod analysis;
mod concept_model;
mod feedback;
mod grade;
mod labels;
mod matching;
mod result;

pub use analysis::{AnalysisResult, FactualError};
pub use concept_model::{ConceptModel, FALLBACK_PRINCIPAL_CONCEPT};
pub use feedback::{CorrectedError, FeedbackBundle, StudentFeedback, TeacherNote, FALLBACK_OBSERVATION};
pub use grade::{
    clamp_grade, Adjustment, CriterionScore, DefaultWeighting, GradeResult, FALLBACK_GRADE,
    MAX_GRADE, MIN_GRADE,
};
pub use labels::{Confidence, Difficulty, QualityRating, Severity, Subject};
pub use matching::{fold, ConceptMatcher};
pub use result::{EvaluationEnvelope, EvaluationResult};
