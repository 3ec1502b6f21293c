//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, progress reporting,
//! and the evaluation runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod progress;

// Re-export commonly used types
pub use app::{run_evaluation, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, EvaluateOptions};
pub use presenter::Presenter;
