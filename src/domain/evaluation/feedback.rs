//! Narrative feedback for the student and the instructor

use serde::{Deserialize, Serialize};

/// Teacher observation recorded when feedback could not be generated
pub const FALLBACK_OBSERVATION: &str =
    "Automatic feedback could not be generated from the backend output; review the analysis and grade manually.";

/// An error restated pedagogically
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectedError {
    pub said: String,
    pub correct: String,
    pub why: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentFeedback {
    pub summary: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub corrected_errors: Vec<CorrectedError>,
    pub study_recommendations: Vec<String>,
    pub motivational_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeacherNote {
    pub observations: String,
    pub error_pattern: String,
    pub reinforcement_suggestion: String,
    pub comparison_to_expected: String,
}

/// Student-facing and instructor-facing feedback
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackBundle {
    pub student_feedback: StudentFeedback,
    pub teacher_note: TeacherNote,
}

impl FeedbackBundle {
    /// Empty bundle carrying an explanatory note for the instructor
    pub fn fallback() -> Self {
        Self {
            student_feedback: StudentFeedback::default(),
            teacher_note: TeacherNote {
                observations: FALLBACK_OBSERVATION.to_string(),
                ..TeacherNote::default()
            },
        }
    }
}
