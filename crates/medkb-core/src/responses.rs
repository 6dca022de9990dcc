//! Response shapes returned to the chatbot layer.
//!
//! The chatbot response generator turns these into user-facing messages. Every
//! symptom-check response carries [`MEDICAL_DISCLAIMER`], on the success path
//! and on the soft-failure path alike.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ContentType, DifficultyLevel, SeverityLevel, UrgencyLevel};

/// Shown with every symptom assessment.
pub const MEDICAL_DISCLAIMER: &str = "Thông tin này chỉ mang tính chất tham khảo, \
không thay thế cho việc tư vấn, chẩn đoán và điều trị của bác sĩ chuyên môn. \
Nếu có dấu hiệu nghiêm trọng, hãy liên hệ cơ sở y tế ngay.";

/// A catalog symptom matched from one of the caller's phrases.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MatchedSymptom {
    pub symptom_id: String,
    pub name: String,
    /// The caller's phrase that produced the match.
    pub input: String,
    /// Similarity on the 0–100 scale.
    pub match_score: f64,
    pub urgency_level: UrgencyLevel,
    pub body_part: Option<String>,
}

/// A disease linked to one or more matched symptoms.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RelatedDisease {
    pub disease_id: String,
    pub name: String,
    pub icd_code: Option<String>,
    pub severity: SeverityLevel,
    pub is_contagious: bool,
    pub is_chronic: bool,
    /// Number of matched symptoms this disease is linked to.
    pub matched_symptoms: usize,
    /// `matched_symptoms / distinct matched symptoms`, clamped to 1.0.
    pub match_fraction: f64,
}

/// Successful symptom-check result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SymptomAssessment {
    pub matched_symptoms: Vec<MatchedSymptom>,
    pub related_diseases: Vec<RelatedDisease>,
    pub urgency: UrgencyLevel,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

/// Soft failure: the check could not run, but the caller still gets a
/// renderable result with the disclaimer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SymptomCheckFailure {
    pub error: String,
    pub disclaimer: String,
}

impl SymptomCheckFailure {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            disclaimer: MEDICAL_DISCLAIMER.to_string(),
        }
    }
}

/// Result of `SymptomMatcher::check`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum SymptomCheckOutcome {
    Assessed(SymptomAssessment),
    Failed(SymptomCheckFailure),
}

impl SymptomCheckOutcome {
    #[must_use]
    pub fn disclaimer(&self) -> &str {
        match self {
            Self::Assessed(a) => &a.disclaimer,
            Self::Failed(f) => &f.disclaimer,
        }
    }

    #[must_use]
    pub const fn assessment(&self) -> Option<&SymptomAssessment> {
        match self {
            Self::Assessed(a) => Some(a),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Assessed(_) => None,
            Self::Failed(f) => Some(&f.error),
        }
    }
}

/// One knowledge entry recommended for a free-text question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Recommendation {
    pub entry_id: String,
    pub title: String,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub content_type: ContentType,
    pub difficulty_level: DifficultyLevel,
    pub score: f64,
    /// Natural-language reason the entry was picked.
    pub why_recommended: String,
}
