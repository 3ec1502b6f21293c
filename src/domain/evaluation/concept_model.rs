//! Concept model derived from the reference material

use serde::{Deserialize, Serialize};

use super::labels::{Difficulty, Subject};

/// Principal concept used when the reference material could not be structured
pub const FALLBACK_PRINCIPAL_CONCEPT: &str = "General understanding of the reference material";

/// What a complete answer is expected to contain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptModel {
    pub principal_concepts: Vec<String>,
    pub secondary_concepts: Vec<String>,
    pub specific_facts: Vec<String>,
    pub process_relations: Vec<String>,
    pub detected_subject: Subject,
    pub difficulty_level: Difficulty,
}

impl ConceptModel {
    /// Conservative model used when extraction output is unusable
    pub fn fallback() -> Self {
        Self {
            principal_concepts: vec![FALLBACK_PRINCIPAL_CONCEPT.to_string()],
            secondary_concepts: Vec::new(),
            specific_facts: Vec::new(),
            process_relations: Vec::new(),
            detected_subject: Subject::General,
            difficulty_level: Difficulty::Intermediate,
        }
    }

    /// Principal concepts followed by secondary ones
    pub fn all_concepts(&self) -> impl Iterator<Item = &String> {
        self.principal_concepts
            .iter()
            .chain(self.secondary_concepts.iter())
    }

    /// Drop blank entries left behind by sloppy backend output
    pub(crate) fn without_blanks(mut self) -> Self {
        for list in [
            &mut self.principal_concepts,
            &mut self.secondary_concepts,
            &mut self.specific_facts,
            &mut self.process_relations,
        ] {
            list.retain(|item| !item.trim().is_empty());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_has_single_generic_concept() {
        let model = ConceptModel::fallback();
        assert_eq!(model.principal_concepts, vec![FALLBACK_PRINCIPAL_CONCEPT]);
        assert!(model.secondary_concepts.is_empty());
        assert_eq!(model.detected_subject, Subject::General);
    }

    #[test]
    fn missing_key_fails_to_decode() {
        let json = r#"{"principal_concepts": ["a"], "secondary_concepts": []}"#;
        assert!(serde_json::from_str::<ConceptModel>(json).is_err());
    }

    #[test]
    fn all_concepts_orders_principal_first() {
        let model = ConceptModel {
            principal_concepts: vec!["p".into()],
            secondary_concepts: vec!["s".into()],
            ..ConceptModel::fallback()
        };
        let all: Vec<_> = model.all_concepts().cloned().collect();
        assert_eq!(all, vec!["p", "s"]);
    }

    #[test]
    fn without_blanks_drops_empty_entries() {
        let model = ConceptModel {
            principal_concepts: vec!["".into(), "cloroplasto".into(), "  ".into()],
            ..ConceptModel::fallback()
        }
        .without_blanks();
        assert_eq!(model.principal_concepts, vec!["cloroplasto"]);
    }
}
