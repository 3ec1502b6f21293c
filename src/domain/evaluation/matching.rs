//! Fuzzy concept matching and coverage

/// Fold a phrase for comparison: lower-case, accents removed, whitespace collapsed.
pub fn fold(phrase: &str) -> String {
    let folded: String = phrase
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive, bidirectional substring matcher for concept phrases.
///
/// Equal phrases always match. Containment only counts when the shorter
/// phrase has at least `min_substring_len` characters, so that short common
/// fragments ("co", "de") do not inflate coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConceptMatcher {
    pub min_substring_len: usize,
}

impl ConceptMatcher {
    pub const fn new(min_substring_len: usize) -> Self {
        Self { min_substring_len }
    }

    /// Whether two concept phrases refer to the same concept
    pub fn matches(&self, a: &str, b: &str) -> bool {
        let a = fold(a);
        let b = fold(b);
        if a.is_empty() || b.is_empty() {
            return false;
        }
        if a == b {
            return true;
        }
        let (shorter, longer) = if a.chars().count() <= b.chars().count() {
            (&a, &b)
        } else {
            (&b, &a)
        };
        shorter.chars().count() >= self.min_substring_len && longer.contains(shorter.as_str())
    }

    /// Whether any phrase in `candidates` matches `concept`
    pub fn any_matches<S: AsRef<str>>(&self, concept: &str, candidates: &[S]) -> bool {
        candidates.iter().any(|c| self.matches(concept, c.as_ref()))
    }

    /// Weighted coverage in [0, 100]: principal concepts count double.
    ///
    /// With no principal or secondary concepts defined the answer is fully covered.
    pub fn coverage<S: AsRef<str>>(
        &self,
        principal: &[S],
        secondary: &[S],
        correct: &[S],
    ) -> f64 {
        let total = principal.len() * 2 + secondary.len();
        if total == 0 {
            return 100.0;
        }
        let hits = |concepts: &[S]| {
            concepts
                .iter()
                .filter(|c| self.any_matches(c.as_ref(), correct))
                .count()
        };
        let covered = hits(principal) * 2 + hits(secondary);
        covered as f64 / total as f64 * 100.0
    }
}

impl Default for ConceptMatcher {
    fn default() -> Self {
        Self::new(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_strips_case_accents_and_spacing() {
        assert_eq!(fold("  Fotosíntesis   del  Agua "), "fotosintesis del agua");
    }

    #[test]
    fn equal_phrases_match_regardless_of_case() {
        let matcher = ConceptMatcher::default();
        assert!(matcher.matches("Ciclo de Calvin", "ciclo de calvin"));
        assert!(matcher.matches("A", "a"));
    }

    #[test]
    fn containment_matches_in_both_directions() {
        let matcher = ConceptMatcher::default();
        assert!(matcher.matches("fase luminosa", "la fase luminosa en los tilacoides"));
        assert!(matcher.matches("la fase luminosa en los tilacoides", "fase luminosa"));
    }

    #[test]
    fn short_fragments_do_not_match_by_containment() {
        let matcher = ConceptMatcher::default();
        assert!(!matcher.matches("CO", "ciclo de calvin con CO2"));
        assert!(ConceptMatcher::new(2).matches("CO", "ciclo de calvin con CO2"));
    }

    #[test]
    fn empty_phrases_never_match() {
        let matcher = ConceptMatcher::default();
        assert!(!matcher.matches("", ""));
        assert!(!matcher.matches("  ", "glucosa"));
    }

    #[test]
    fn coverage_weights_principal_double() {
        let matcher = ConceptMatcher::default();
        let coverage = matcher.coverage(&["A", "B"], &["C"], &["A"]);
        assert!((coverage - 40.0).abs() < 1e-9);
    }

    #[test]
    fn coverage_counts_secondary_once() {
        let matcher = ConceptMatcher::default();
        let coverage = matcher.coverage(&["A", "B"], &["C"], &["C"]);
        assert!((coverage - 20.0).abs() < 1e-9);
    }

    #[test]
    fn coverage_without_concepts_is_full() {
        let matcher = ConceptMatcher::default();
        let empty: [&str; 0] = [];
        assert_eq!(matcher.coverage(&empty, &empty, &["anything"]), 100.0);
    }

    #[test]
    fn coverage_with_fuzzy_hits() {
        let matcher = ConceptMatcher::default();
        let coverage = matcher.coverage(
            &["fase luminosa", "ciclo de Calvin"],
            &["estomas"],
            &["la fase luminosa", "el ciclo de calvin en el estroma"],
        );
        assert!((coverage - 80.0).abs() < 1e-9);
    }
}
