//! Concept extractor stage

use tracing::debug;

use crate::application::ports::{CompletionRequest, GatewayError, TextCompletion};
use crate::domain::evaluation::ConceptModel;
use crate::domain::structured::{decode_or, Decoded};

const INSTRUCTION: &str = r#"You are an expert academic curriculum analyst. A teacher will grade an oral exam against the reference material below. Extract what a student is expected to know.

Respond ONLY with a JSON object with exactly these keys:
{
  "principal_concepts": ["ideas that are critical for a passing answer"],
  "secondary_concepts": ["ideas that strengthen the answer but are not required"],
  "specific_facts": ["dates, figures, formulas, names, locations"],
  "process_relations": ["cause -> effect or ordered process steps"],
  "detected_subject": "Biology | Math | History | Physics | Chemistry | Literature | Other",
  "difficulty_level": "Basic | Intermediate | Advanced"
}

Rules:
- Write each concept as a short noun phrase in the language of the material
- Do not repeat a concept across lists
- Do not add commentary before or after the JSON"#;

/// Derives the concept model from the reference material.
pub struct ConceptExtractor<'a, G: TextCompletion + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: TextCompletion + ?Sized> ConceptExtractor<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub(crate) fn build_request(reference_material: &str) -> CompletionRequest {
        CompletionRequest::new(
            INSTRUCTION,
            format!("REFERENCE MATERIAL:\n<<<\n{}\n>>>", reference_material.trim()),
        )
        .temperature(0.2)
        .max_output_tokens(1500)
    }

    /// Extract the concept model; malformed output yields [`ConceptModel::fallback`].
    pub async fn extract(
        &self,
        reference_material: &str,
    ) -> Result<Decoded<ConceptModel>, GatewayError> {
        let raw = self
            .gateway
            .complete(&Self::build_request(reference_material))
            .await?;
        let decoded = decode_or(&raw, ConceptModel::fallback).map(ConceptModel::without_blanks);
        if let Decoded::Parsed(model) = &decoded {
            debug!(
                principal = model.principal_concepts.len(),
                secondary = model.secondary_concepts.len(),
                subject = %model.detected_subject,
                "concept model extracted"
            );
        }
        Ok(decoded)
    }
}
