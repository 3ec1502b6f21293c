//! Transcript value object

use serde::{Deserialize, Serialize};

/// Text returned by the transcription service for one recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub duration_seconds: Option<f64>,
}

impl Transcript {
    pub fn new(text: impl Into<String>, duration_seconds: Option<f64>) -> Self {
        Self {
            text: text.into(),
            duration_seconds,
        }
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }
}

/// Number of whitespace-separated words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
