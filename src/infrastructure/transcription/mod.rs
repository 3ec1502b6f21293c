//! Transcription adapters

mod gemini;
mod groq_whisper;

pub use gemini::GeminiTranscriber;
pub use groq_whisper::GroqWhisperTranscriber;
