//! Best-effort grade recovery from unstructured text

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::evaluation::{MAX_GRADE, MIN_GRADE};

/// Patterns tried in priority order; each captures the number in group 1.
///
/// The capture takes every digit so that "100" is read whole and rejected
/// by the range check instead of being cut down to "10".
static GRADE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    const NUM: &str = r#"(\d+(?:[.,]\d+)?)"#;
    [
        format!(r#"(?i)"(?:final_grade|calificacion_final)"\s*:\s*"?{NUM}"#),
        format!(r#"(?i)\bgrade\s*:\s*"?{NUM}"#),
        format!(r#"\b{NUM}\s*/\s*10\b"#),
        format!(r#"(?i)\bnot[ae]\s*:\s*"?{NUM}"#),
        format!(r#"(?i)\bscore\s*:\s*"?{NUM}"#),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("grade pattern is valid"))
    .collect()
});

/// Find the first grade in [0, 10] mentioned in `raw`, by pattern priority.
pub fn extract_grade(raw: &str) -> Option<f64> {
    GRADE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
            .find(|grade| (MIN_GRADE..=MAX_GRADE).contains(grade))
    })
}
