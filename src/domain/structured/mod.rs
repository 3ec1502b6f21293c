//! Structured decoding of free-form backend output

mod decoded;
mod grade_text;
mod sanitize;

pub use decoded::{decode_or, decode_or_else, Decoded};
pub use grade_text::extract_grade;
pub use sanitize::sanitize_json;
