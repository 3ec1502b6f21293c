//! Evaluate oral exam use case

use thiserror::Error;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::domain::evaluation::{ConceptMatcher, EvaluationEnvelope, EvaluationResult};
use crate::domain::structured::Decoded;
use crate::domain::transcription::AudioData;

use super::ports::{
    GatewayError, Stage, StageObserver, StageOutcome, TextCompletion, Transcriber,
    TranscriptionError,
};
use super::stages::{
    ConceptExtractor, FeedbackGenerator, GradingCalculator, ResponseAnalyzer,
    TranscriptNormalizer,
};

/// Errors that halt the evaluation pipeline
#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("Text completion failed during {stage}: {source}")]
    Gateway {
        stage: Stage,
        #[source]
        source: GatewayError,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Input parameters for the evaluate use case
#[derive(Debug, Clone)]
pub struct EvaluateInput {
    /// The recorded answer
    pub audio: AudioData,
    /// Material the answer is graded against
    pub reference_material: String,
    /// Free-text rubric; may be empty
    pub rubric: String,
    /// Whether to remove disfluencies before analysis
    pub normalize: bool,
    /// Language of the recording, passed to the transcriber
    pub language_hint: Option<String>,
}

/// Raw outputs of the stages that fell back, for diagnosis
#[derive(Debug, Default)]
struct RawResponses(Vec<(Stage, String)>);

impl RawResponses {
    fn push(&mut self, stage: Stage, raw: String) {
        self.0.push((stage, raw));
    }

    fn into_report(self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(
            self.0
                .into_iter()
                .map(|(stage, raw)| format!("[{}]\n{}", stage, raw))
                .collect::<Vec<_>>()
                .join("\n\n"),
        )
    }
}

/// Sequential evaluation pipeline:
/// transcribe, normalize, extract concepts, analyze, grade, write feedback, assemble.
pub struct EvaluateExamUseCase<T, G, O>
where
    T: Transcriber,
    G: TextCompletion,
    O: StageObserver,
{
    transcriber: T,
    gateway: G,
    observer: O,
    matcher: ConceptMatcher,
}

impl<T, G, O> EvaluateExamUseCase<T, G, O>
where
    T: Transcriber,
    G: TextCompletion,
    O: StageObserver,
{
    /// Create a new use case instance
    pub fn new(transcriber: T, gateway: G, observer: O) -> Self {
        Self {
            transcriber,
            gateway,
            observer,
            matcher: ConceptMatcher::default(),
        }
    }

    /// Use a different concept-matching strategy
    pub fn with_matcher(mut self, matcher: ConceptMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Run the whole pipeline and wrap the outcome in an envelope.
    ///
    /// The envelope carries either a complete evaluation or an error, never
    /// a partial result.
    pub async fn execute(&self, input: EvaluateInput) -> EvaluationEnvelope {
        let span = info_span!("evaluation", provider = self.gateway.provider_name());
        match self.run(input).instrument(span).await {
            Ok((evaluation, raw_response)) => EvaluationEnvelope::success(evaluation, raw_response),
            Err(e) => {
                error!(error = %e, "evaluation failed");
                EvaluationEnvelope::failure(e.to_string())
            }
        }
    }

    /// Run the whole pipeline, returning the evaluation and any raw fallback output
    pub async fn run(
        &self,
        input: EvaluateInput,
    ) -> Result<(EvaluationResult, Option<String>), EvaluateError> {
        if input.reference_material.trim().is_empty() {
            return Err(EvaluateError::InvalidInput(
                "reference material is empty".to_string(),
            ));
        }
        let mut raw_responses = RawResponses::default();

        // Transcribe
        self.begin(Stage::Transcribe);
        let transcribed = self
            .transcriber
            .transcribe(&input.audio, input.language_hint.as_deref())
            .instrument(info_span!("stage", name = Stage::Transcribe.as_str()))
            .await
            .and_then(|t| {
                if t.text.trim().is_empty() {
                    Err(TranscriptionError::EmptyResponse)
                } else {
                    Ok(t)
                }
            });
        let transcript = match transcribed {
            Ok(t) => {
                self.finish(Stage::Transcribe, StageOutcome::Completed);
                t
            }
            Err(e) => {
                self.finish(Stage::Transcribe, StageOutcome::Failed { error: e.to_string() });
                return Err(e.into());
            }
        };
        debug!(
            words = transcript.word_count(),
            duration = ?transcript.duration_seconds,
            "transcript received"
        );

        // Normalize
        self.begin(Stage::Normalize);
        let normalized = if input.normalize {
            let decoded = TranscriptNormalizer::new(&self.gateway)
                .normalize(&transcript.text)
                .instrument(info_span!("stage", name = Stage::Normalize.as_str()))
                .await;
            match decoded {
                Decoded::Parsed(text) => {
                    self.finish(Stage::Normalize, StageOutcome::Completed);
                    text
                }
                Decoded::Fallback { value, reason, .. } => {
                    self.finish(Stage::Normalize, StageOutcome::Fallback { reason });
                    value
                }
            }
        } else {
            self.finish(Stage::Normalize, StageOutcome::Skipped);
            transcript.text.clone()
        };

        // Extract concepts
        self.begin(Stage::ExtractConcepts);
        let result = ConceptExtractor::new(&self.gateway)
            .extract(&input.reference_material)
            .instrument(info_span!("stage", name = Stage::ExtractConcepts.as_str()))
            .await;
        let concept_model = self.settle(Stage::ExtractConcepts, result, &mut raw_responses)?;

        // Analyze response
        self.begin(Stage::AnalyzeResponse);
        let result = ResponseAnalyzer::new(&self.gateway, self.matcher)
            .analyze(&normalized, &concept_model)
            .instrument(info_span!("stage", name = Stage::AnalyzeResponse.as_str()))
            .await;
        let analysis = self.settle(Stage::AnalyzeResponse, result, &mut raw_responses)?;

        // Calculate grade
        self.begin(Stage::CalculateGrade);
        let result = GradingCalculator::new(&self.gateway, self.matcher)
            .grade(&concept_model, &analysis, &input.rubric)
            .instrument(info_span!("stage", name = Stage::CalculateGrade.as_str()))
            .await;
        let grade = self.settle(Stage::CalculateGrade, result, &mut raw_responses)?;

        // Generate feedback
        self.begin(Stage::GenerateFeedback);
        let result = FeedbackGenerator::new(&self.gateway)
            .generate(&analysis, &grade, &concept_model)
            .instrument(info_span!("stage", name = Stage::GenerateFeedback.as_str()))
            .await;
        let feedback = self.settle(Stage::GenerateFeedback, result, &mut raw_responses)?;

        // Assemble
        self.begin(Stage::Assemble);
        let evaluation = EvaluationResult::assemble(
            transcript.text,
            normalized,
            transcript.duration_seconds,
            concept_model,
            analysis,
            grade,
            feedback,
            &self.matcher,
        );
        self.finish(Stage::Assemble, StageOutcome::Completed);
        info!(
            grade = evaluation.grade.final_grade,
            confidence = %evaluation.grade.confidence,
            coverage = evaluation.coverage_percentage,
            "evaluation complete"
        );

        Ok((evaluation, raw_responses.into_report()))
    }

    fn begin(&self, stage: Stage) {
        debug!(stage = %stage, "stage started");
        self.observer.stage_started(stage);
    }

    fn finish(&self, stage: Stage, outcome: StageOutcome) {
        match &outcome {
            StageOutcome::Completed => debug!(stage = %stage, "stage completed"),
            StageOutcome::Skipped => debug!(stage = %stage, "stage skipped"),
            StageOutcome::Fallback { reason } => {
                warn!(stage = %stage, reason = %reason, "stage used fallback value")
            }
            StageOutcome::Failed { error } => error!(stage = %stage, error = %error, "stage failed"),
        }
        self.observer.stage_finished(stage, &outcome);
    }

    /// Report a structured stage's outcome and unwrap its value
    fn settle<V>(
        &self,
        stage: Stage,
        result: Result<Decoded<V>, GatewayError>,
        raw_responses: &mut RawResponses,
    ) -> Result<V, EvaluateError> {
        match result {
            Ok(Decoded::Parsed(value)) => {
                self.finish(stage, StageOutcome::Completed);
                Ok(value)
            }
            Ok(Decoded::Fallback { value, raw, reason }) => {
                self.finish(stage, StageOutcome::Fallback { reason });
                raw_responses.push(stage, raw);
                Ok(value)
            }
            Err(source) => {
                self.finish(
                    stage,
                    StageOutcome::Failed {
                        error: source.to_string(),
                    },
                );
                Err(EvaluateError::Gateway { stage, source })
            }
        }
    }
}
