//! Configuration domain module

mod app_config;
mod provider;

pub use app_config::{
    AppConfig, DEFAULT_GEMINI_MODEL, DEFAULT_GROQ_LLM_MODEL, DEFAULT_GROQ_TRANSCRIPTION_MODEL,
};
pub use provider::{Provider, ALL_PROVIDERS};
