//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod completion;
pub mod config;
pub mod observer;
pub mod transcriber;

// Re-export common types
pub use completion::{CompletionRequest, GatewayError, TextCompletion};
pub use config::ConfigStore;
pub use observer::{NoopObserver, Stage, StageObserver, StageOutcome};
pub use transcriber::{Transcriber, TranscriptionError};
