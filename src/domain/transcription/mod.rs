//! Transcription domain module

mod audio_data;
mod transcript;

pub use audio_data::{AudioData, AudioMimeType, MAX_UPLOAD_BYTES};
pub use transcript::{word_count, Transcript};
