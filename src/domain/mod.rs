//! Domain layer - Core business logic
//!
//! Contains value objects, the evaluation data model, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod structured;
pub mod transcription;

// Re-export common types
pub use config::{AppConfig, Provider};
pub use error::*;
pub use evaluation::{EvaluationEnvelope, EvaluationResult};
pub use transcription::{AudioData, AudioMimeType, Transcript};
