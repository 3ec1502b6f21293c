//! Analysis of the student's answer against the concept model

use serde::{Deserialize, Serialize};

use super::concept_model::ConceptModel;
use super::labels::{QualityRating, Severity};
use super::matching::{fold, ConceptMatcher};

/// A statement that contradicts the reference material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactualError {
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub student_quote: String,
}

/// Comparison of the normalized transcript with the concept model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub correct_concepts: Vec<String>,
    pub omitted_concepts: Vec<String>,
    pub factual_errors: Vec<FactualError>,
    #[serde(default)]
    pub fabricated_claims: Vec<String>,
    pub clarity: QualityRating,
    pub coherence: QualityRating,
    pub technical_vocabulary: QualityRating,
    #[serde(default)]
    pub highlighted_quotes: Vec<String>,
}

impl AnalysisResult {
    /// Neutral analysis used when the backend output is unusable
    pub fn fallback() -> Self {
        Self {
            correct_concepts: Vec::new(),
            omitted_concepts: Vec::new(),
            factual_errors: Vec::new(),
            fabricated_claims: Vec::new(),
            clarity: QualityRating::Regular,
            coherence: QualityRating::Regular,
            technical_vocabulary: QualityRating::Regular,
            highlighted_quotes: Vec::new(),
        }
    }

    /// Number of errors tagged severe
    pub fn severe_error_count(&self) -> usize {
        self.factual_errors
            .iter()
            .filter(|e| e.severity == Severity::Severe)
            .count()
    }

    /// Make the concept sets consistent with the concept model.
    ///
    /// Duplicates are removed, a credited concept is dropped from the omitted
    /// set, and every model concept the backend neither credited nor listed
    /// as omitted is added to the omitted set.
    pub fn reconcile(mut self, model: &ConceptModel, matcher: &ConceptMatcher) -> Self {
        dedup_folded(&mut self.correct_concepts);
        dedup_folded(&mut self.omitted_concepts);
        let correct = &self.correct_concepts;
        self.omitted_concepts
            .retain(|omitted| !matcher.any_matches(omitted, correct));

        let unaccounted: Vec<String> = model
            .all_concepts()
            .filter(|concept| {
                !matcher.any_matches(concept, &self.correct_concepts)
                    && !matcher.any_matches(concept, &self.omitted_concepts)
            })
            .cloned()
            .collect();
        self.omitted_concepts.extend(unaccounted);
        self
    }
}

fn dedup_folded(items: &mut Vec<String>) {
    let mut seen = Vec::new();
    items.retain(|item| {
        let key = fold(item);
        if key.is_empty() || seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
}
