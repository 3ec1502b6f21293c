//! Pipeline stages
//!
//! Each stage makes one gateway call. The structured stages never fail on
//! malformed output: they return [`Decoded::Fallback`](crate::domain::structured::Decoded)
//! with their documented default. Gateway errors are returned as-is.

mod analyzer;
mod concepts;
mod feedback;
mod grading;
mod normalizer;
#[cfg(test)]
pub(crate) mod testing;

pub use analyzer::ResponseAnalyzer;
pub use concepts::ConceptExtractor;
pub use feedback::FeedbackGenerator;
pub use grading::GradingCalculator;
pub use normalizer::TranscriptNormalizer;
