//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the Groq and Gemini HTTP APIs and the config file.

pub mod completion;
pub mod config;
mod factory;
mod gemini_api;
mod http;
pub mod transcription;

// Re-export adapters
pub use completion::{GeminiCompletion, GroqCompletion};
pub use config::XdgConfigStore;
pub use factory::{create_gateway, create_transcriber};
pub use transcription::{GeminiTranscriber, GroqWhisperTranscriber};
