//! Stage observer port interface

use std::fmt;

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Transcribe,
    Normalize,
    ExtractConcepts,
    AnalyzeResponse,
    CalculateGrade,
    GenerateFeedback,
    Assemble,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transcribe => "transcribe",
            Self::Normalize => "normalize",
            Self::ExtractConcepts => "extract_concepts",
            Self::AnalyzeResponse => "analyze_response",
            Self::CalculateGrade => "calculate_grade",
            Self::GenerateFeedback => "generate_feedback",
            Self::Assemble => "assemble",
        }
    }

    /// Progress message shown while the stage runs
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Transcribe => "Transcribing audio...",
            Self::Normalize => "Cleaning transcript...",
            Self::ExtractConcepts => "Extracting concepts from reference material...",
            Self::AnalyzeResponse => "Analyzing the answer...",
            Self::CalculateGrade => "Calculating grade...",
            Self::GenerateFeedback => "Writing feedback...",
            Self::Assemble => "Assembling evaluation...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a stage ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Completed,
    /// Output was unusable and the stage substituted its default
    Fallback { reason: String },
    Skipped,
    Failed { error: String },
}

/// Hook notified around every pipeline stage
pub trait StageObserver: Send + Sync {
    fn stage_started(&self, stage: Stage);

    fn stage_finished(&self, stage: Stage, outcome: &StageOutcome);
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn stage_started(&self, _stage: Stage) {}

    fn stage_finished(&self, _stage: Stage, _outcome: &StageOutcome) {}
}

impl<T: StageObserver + ?Sized> StageObserver for &T {
    fn stage_started(&self, stage: Stage) {
        (**self).stage_started(stage)
    }

    fn stage_finished(&self, stage: Stage, outcome: &StageOutcome) {
        (**self).stage_finished(stage, outcome)
    }
}
