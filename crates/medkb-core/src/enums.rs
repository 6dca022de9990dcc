//! Tier and kind enums for knowledge content.
//!
//! All enums serialize as `SCREAMING_SNAKE_CASE` (the values stored by the
//! content store). Urgency and severity are totally ordered from least to most
//! serious, so `max()` over a set of tiers yields the most serious one.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Implements `Display` and case-insensitive `FromStr` on top of `as_str()`/`ALL`.
macro_rules! string_enum {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| CoreError::Validation(format!("unknown {}: {s}", $label)))
            }
        }
    };
}

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// Kind of a knowledge entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Article,
    Faq,
    Guide,
    Warning,
    Fact,
}

impl ContentType {
    pub const ALL: [Self; 5] = [
        Self::Article,
        Self::Faq,
        Self::Guide,
        Self::Warning,
        Self::Fact,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Article => "ARTICLE",
            Self::Faq => "FAQ",
            Self::Guide => "GUIDE",
            Self::Warning => "WARNING",
            Self::Fact => "FACT",
        }
    }
}

string_enum!(ContentType, "content type");

// ---------------------------------------------------------------------------
// DifficultyLevel
// ---------------------------------------------------------------------------

/// Reading level a knowledge entry is written for.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    #[default]
    Basic,
    Intermediate,
    Advanced,
    Professional,
}

impl DifficultyLevel {
    pub const ALL: [Self; 4] = [
        Self::Basic,
        Self::Intermediate,
        Self::Advanced,
        Self::Professional,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
            Self::Professional => "PROFESSIONAL",
        }
    }
}

string_enum!(DifficultyLevel, "difficulty level");

// ---------------------------------------------------------------------------
// UrgencyLevel
// ---------------------------------------------------------------------------

/// How quickly a symptom needs medical attention.
///
/// ```text
/// LOW < MEDIUM < HIGH < EMERGENCY
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyLevel {
    #[default]
    Low,
    Medium,
    High,
    Emergency,
}

impl UrgencyLevel {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Emergency];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Emergency => "EMERGENCY",
        }
    }
}

string_enum!(UrgencyLevel, "urgency level");

// ---------------------------------------------------------------------------
// SeverityLevel
// ---------------------------------------------------------------------------

/// Severity of a disease.
///
/// ```text
/// MILD < MODERATE < SEVERE < CRITICAL
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityLevel {
    #[default]
    Mild,
    Moderate,
    Severe,
    Critical,
}

impl SeverityLevel {
    pub const ALL: [Self; 4] = [Self::Mild, Self::Moderate, Self::Severe, Self::Critical];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "MILD",
            Self::Moderate => "MODERATE",
            Self::Severe => "SEVERE",
            Self::Critical => "CRITICAL",
        }
    }
}

string_enum!(SeverityLevel, "severity level");

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn urgency_is_totally_ordered() {
        assert!(UrgencyLevel::Low < UrgencyLevel::Medium);
        assert!(UrgencyLevel::Medium < UrgencyLevel::High);
        assert!(UrgencyLevel::High < UrgencyLevel::Emergency);
        let max = [UrgencyLevel::Medium, UrgencyLevel::Emergency, UrgencyLevel::Low]
            .into_iter()
            .max();
        assert_eq!(max, Some(UrgencyLevel::Emergency));
    }

    #[test]
    fn severity_is_totally_ordered() {
        assert!(SeverityLevel::Mild < SeverityLevel::Moderate);
        assert!(SeverityLevel::Severe < SeverityLevel::Critical);
    }

    #[rstest]
    #[case("faq", ContentType::Faq)]
    #[case("ARTICLE", ContentType::Article)]
    #[case(" Warning ", ContentType::Warning)]
    fn content_type_parses_case_insensitively(#[case] raw: &str, #[case] expected: ContentType) {
        assert_eq!(raw.parse::<ContentType>().unwrap(), expected);
    }

    #[test]
    fn unknown_value_is_a_validation_error() {
        let err = "podcast".parse::<ContentType>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn serializes_screaming_snake_case() {
        let json = serde_json::to_string(&UrgencyLevel::Emergency).unwrap();
        assert_eq!(json, "\"EMERGENCY\"");
        let back: DifficultyLevel = serde_json::from_str("\"PROFESSIONAL\"").unwrap();
        assert_eq!(back, DifficultyLevel::Professional);
    }

    #[test]
    fn display_matches_as_str() {
        for tier in UrgencyLevel::ALL {
            assert_eq!(tier.to_string(), tier.as_str());
        }
    }
}
