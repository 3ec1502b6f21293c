//! Parse-or-fallback decoding of structured backend output

use serde::de::DeserializeOwned;

use super::sanitize::sanitize_json;

/// Outcome of decoding backend text into `T`.
///
/// Both arms carry a usable value; `Fallback` also keeps the offending raw
/// text and the parser's reason for diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Parsed(T),
    Fallback { value: T, raw: String, reason: String },
}

impl<T> Decoded<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Parsed(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Parsed(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Raw text that failed to decode, if any
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Parsed(_) => None,
            Self::Fallback { raw, .. } => Some(raw),
        }
    }

    /// Transform the value, keeping the fallback metadata
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        match self {
            Self::Parsed(value) => Decoded::Parsed(f(value)),
            Self::Fallback { value, raw, reason } => Decoded::Fallback {
                value: f(value),
                raw,
                reason,
            },
        }
    }
}

/// Sanitize `raw` and decode it as `T`, substituting `fallback` on failure.
pub fn decode_or<T, F>(raw: &str, fallback: F) -> Decoded<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    decode_or_else(raw, |_| fallback())
}

/// Like [`decode_or`], but the fallback may inspect the raw text.
pub fn decode_or_else<T, F>(raw: &str, fallback: F) -> Decoded<T>
where
    T: DeserializeOwned,
    F: FnOnce(&str) -> T,
{
    match serde_json::from_str::<T>(&sanitize_json(raw)) {
        Ok(value) => Decoded::Parsed(value),
        Err(e) => Decoded::Fallback {
            value: fallback(raw),
            raw: raw.to_string(),
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        score: u32,
    }

    #[test]
    fn parses_wrapped_payload() {
        let decoded = decode_or("```json\n{\"score\": 3}\n```", || Probe { score: 0 });
        assert_eq!(decoded, Decoded::Parsed(Probe { score: 3 }));
    }

    #[test]
    fn falls_back_on_garbage() {
        let decoded = decode_or("I cannot answer that.", || Probe { score: 0 });
        assert!(decoded.is_fallback());
        assert_eq!(decoded.raw(), Some("I cannot answer that."));
        assert_eq!(decoded.into_value(), Probe { score: 0 });
    }

    #[test]
    fn falls_back_on_missing_key() {
        let decoded = decode_or("{\"other\": 1}", || Probe { score: 9 });
        match decoded {
            Decoded::Fallback { value, reason, .. } => {
                assert_eq!(value.score, 9);
                assert!(reason.contains("score"));
            }
            Decoded::Parsed(_) => panic!("expected fallback"),
        }
    }

    #[test]
    fn fallback_can_read_raw_text() {
        let decoded = decode_or_else("score is 4", |raw| Probe {
            score: raw.len() as u32,
        });
        assert_eq!(decoded.value().score, 10);
    }

    #[test]
    fn map_preserves_fallback() {
        let decoded = decode_or("nope", || Probe { score: 1 }).map(|p| p.score * 2);
        assert!(decoded.is_fallback());
        assert_eq!(*decoded.value(), 2);
    }
}
