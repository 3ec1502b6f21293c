//! Oral-Eval - AI-assisted grading of spoken exams
//!
//! This crate transcribes a student's recorded oral answer and grades it
//! against the teacher's reference material and rubric, producing a grade,
//! a concept-coverage analysis and written feedback.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Evaluation value objects, structured-output decoding, config and errors
//! - **Application**: The evaluation pipeline, its stages and the port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Groq, Gemini, XDG config file)
//! - **CLI**: Command-line interface, argument parsing and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
