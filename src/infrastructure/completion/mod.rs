//! Text-completion adapters

mod gemini;
mod groq;

pub use gemini::GeminiCompletion;
pub(crate) use groq::GROQ_API_BASE_URL;
pub use groq::GroqCompletion;
