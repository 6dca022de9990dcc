use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require_non_blank;
use crate::enums::{ContentType, DifficultyLevel};
use crate::errors::CoreError;

/// Longest summary the authoring workflow accepts, in characters.
pub const MAX_SUMMARY_CHARS: usize = 500;

const fn default_reliability() -> f64 {
    1.0
}

const fn default_active() -> bool {
    true
}

/// Topic a knowledge entry is filed under.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct KnowledgeCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A piece of health knowledge: article, FAQ, guide, warning or fact.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KnowledgeEntry {
    pub id: String,
    pub title: String,
    /// Full body text.
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<KnowledgeCategory>,
    pub content_type: ContentType,
    #[serde(default)]
    pub difficulty_level: DifficultyLevel,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// Editorial confidence in `[0, 1]`.
    #[serde(default = "default_reliability")]
    pub reliability_score: f64,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl KnowledgeEntry {
    /// Check the invariants the content store guarantees.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a blank id/title, a reliability
    /// score outside `[0, 1]`, or an over-long summary.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_blank("knowledge entry", "id", &self.id)?;
        require_non_blank("knowledge entry", "title", &self.title)?;
        if !(0.0..=1.0).contains(&self.reliability_score) {
            return Err(CoreError::Validation(format!(
                "knowledge entry {}: reliability_score {} is outside [0, 1]",
                self.id, self.reliability_score
            )));
        }
        if let Some(summary) = &self.summary {
            let chars = summary.chars().count();
            if chars > MAX_SUMMARY_CHARS {
                return Err(CoreError::Validation(format!(
                    "knowledge entry {}: summary has {chars} characters (max {MAX_SUMMARY_CHARS})",
                    self.id
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Keyword list as one space-separated field.
    #[must_use]
    pub fn keyword_text(&self) -> String {
        self.keywords.join(" ")
    }

    /// Title, body, summary, keywords and category name joined for indexing.
    #[must_use]
    pub fn indexable_text(&self) -> String {
        let keywords = self.keyword_text();
        [
            Some(self.title.as_str()),
            Some(self.content.as_str()),
            self.summary.as_deref(),
            Some(keywords.as_str()),
            self.category_name(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}
