//! Application layer - Use cases and port interfaces
//!
//! Contains the evaluation pipeline, its stages, and trait definitions
//! for external system interactions.

pub mod evaluate;
pub mod ports;
pub mod stages;

// Re-export use cases
pub use evaluate::{EvaluateError, EvaluateExamUseCase, EvaluateInput};
