//! Closed vocabularies used by the evaluation data model.
//!
//! Backends answer in free text, so every label decodes leniently: case,
//! accents and common Spanish/English synonyms are accepted, and anything
//! unrecognized maps to the documented default of that vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::matching::fold;

/// Subject detected from the reference material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Subject {
    Biology,
    Math,
    History,
    Physics,
    Chemistry,
    Literature,
    #[default]
    Other,
    /// Only produced by the extraction fallback
    General,
}

impl Subject {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Biology => "Biology",
            Self::Math => "Math",
            Self::History => "History",
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
            Self::Literature => "Literature",
            Self::Other => "Other",
            Self::General => "General",
        }
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        match fold(&value).as_str() {
            "biology" | "biologia" => Self::Biology,
            "math" | "maths" | "mathematics" | "matematicas" | "matematica" => Self::Math,
            "history" | "historia" => Self::History,
            "physics" | "fisica" => Self::Physics,
            "chemistry" | "quimica" => Self::Chemistry,
            "literature" | "literatura" => Self::Literature,
            "general" => Self::General,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty level of the reference material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Difficulty {
    Basic,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        match fold(&value).as_str() {
            "basic" | "basico" | "elementary" => Self::Basic,
            "advanced" | "avanzado" => Self::Advanced,
            _ => Self::Intermediate,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a factual error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Severity {
    Mild,
    #[default]
    Moderate,
    Severe,
}

impl Severity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match fold(&value).as_str() {
            "mild" | "minor" | "low" | "leve" => Self::Mild,
            "severe" | "grave" | "critical" | "critico" | "high" | "major" => Self::Severe,
            _ => Self::Moderate,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four-level scale for communication quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum QualityRating {
    Excellent,
    Good,
    #[default]
    Regular,
    Deficient,
}

impl QualityRating {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Regular => "regular",
            Self::Deficient => "deficient",
        }
    }

    /// Share of the criterion's points this rating earns
    pub const fn weight(&self) -> f64 {
        match self {
            Self::Excellent => 1.0,
            Self::Good => 0.75,
            Self::Regular => 0.5,
            Self::Deficient => 0.25,
        }
    }
}

impl From<String> for QualityRating {
    fn from(value: String) -> Self {
        match fold(&value).as_str() {
            "excellent" | "excelente" => Self::Excellent,
            "good" | "bueno" | "buena" => Self::Good,
            "deficient" | "deficiente" | "poor" | "bad" | "malo" => Self::Deficient,
            _ => Self::Regular,
        }
    }
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much the grade can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

impl Confidence {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl From<String> for Confidence {
    fn from(value: String) -> Self {
        match fold(&value).as_str() {
            "high" | "alta" | "alto" => Self::High,
            "low" | "baja" | "bajo" => Self::Low,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
