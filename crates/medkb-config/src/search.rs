//! Scoring weights for the lexical pass, hybrid merge and re-ranking.
//!
//! The defaults are empirical; every one of them can be overridden through
//! TOML (`[search]`) or `MEDKB_SEARCH__*` environment variables.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_lexical_weight() -> f64 {
    0.6
}
const fn default_semantic_weight() -> f64 {
    0.4
}
const fn default_title_weight() -> f64 {
    3.0
}
const fn default_keyword_weight() -> f64 {
    2.0
}
const fn default_summary_weight() -> f64 {
    1.5
}
const fn default_body_weight() -> f64 {
    1.0
}
const fn default_verified_multiplier() -> f64 {
    1.2
}
const fn default_view_bonus_divisor() -> f64 {
    1000.0
}
const fn default_view_bonus_cap() -> f64 {
    0.5
}
const fn default_recency_bonus_max() -> f64 {
    0.3
}
const fn default_recency_window_days() -> f64 {
    30.0
}
const fn default_limit() -> usize {
    10
}
const fn default_vector_candidate_multiplier() -> usize {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SearchConfig {
    /// Weight of the lexical score when an entry is found by both passes.
    #[serde(default = "default_lexical_weight")]
    pub lexical_weight: f64,

    /// Weight of the semantic score when an entry is found by both passes.
    #[serde(default = "default_semantic_weight")]
    pub semantic_weight: f64,

    #[serde(default = "default_title_weight")]
    pub title_weight: f64,

    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,

    #[serde(default = "default_summary_weight")]
    pub summary_weight: f64,

    #[serde(default = "default_body_weight")]
    pub body_weight: f64,

    /// Applied to the lexical score of verified entries.
    #[serde(default = "default_verified_multiplier")]
    pub verified_multiplier: f64,

    /// View bonus is `min(view_count / divisor, cap)`.
    #[serde(default = "default_view_bonus_divisor")]
    pub view_bonus_divisor: f64,

    #[serde(default = "default_view_bonus_cap")]
    pub view_bonus_cap: f64,

    /// Recency bonus for an entry updated just now; decays linearly to zero.
    #[serde(default = "default_recency_bonus_max")]
    pub recency_bonus_max: f64,

    #[serde(default = "default_recency_window_days")]
    pub recency_window_days: f64,

    /// Final scores below this floor are dropped.
    #[serde(default)]
    pub min_score: f64,

    /// Result limit used when the caller does not give one.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// The vector pass fetches `limit * multiplier` candidates before
    /// post-filtering.
    #[serde(default = "default_vector_candidate_multiplier")]
    pub vector_candidate_multiplier: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lexical_weight: default_lexical_weight(),
            semantic_weight: default_semantic_weight(),
            title_weight: default_title_weight(),
            keyword_weight: default_keyword_weight(),
            summary_weight: default_summary_weight(),
            body_weight: default_body_weight(),
            verified_multiplier: default_verified_multiplier(),
            view_bonus_divisor: default_view_bonus_divisor(),
            view_bonus_cap: default_view_bonus_cap(),
            recency_bonus_max: default_recency_bonus_max(),
            recency_window_days: default_recency_window_days(),
            min_score: 0.0,
            default_limit: default_limit(),
            vector_candidate_multiplier: default_vector_candidate_multiplier(),
        }
    }
}

impl SearchConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for negative or non-finite weights,
    /// a non-positive view divisor or recency window, or a zero candidate
    /// multiplier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("search.lexical_weight", self.lexical_weight),
            ("search.semantic_weight", self.semantic_weight),
            ("search.title_weight", self.title_weight),
            ("search.keyword_weight", self.keyword_weight),
            ("search.summary_weight", self.summary_weight),
            ("search.body_weight", self.body_weight),
            ("search.verified_multiplier", self.verified_multiplier),
            ("search.view_bonus_cap", self.view_bonus_cap),
            ("search.recency_bonus_max", self.recency_bonus_max),
            ("search.min_score", self.min_score),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(field, format!("{value} must be >= 0")));
            }
        }
        if self.view_bonus_divisor.is_nan() || self.view_bonus_divisor <= 0.0 {
            return Err(ConfigError::invalid(
                "search.view_bonus_divisor",
                "must be > 0",
            ));
        }
        if self.recency_window_days.is_nan() || self.recency_window_days <= 0.0 {
            return Err(ConfigError::invalid(
                "search.recency_window_days",
                "must be > 0",
            ));
        }
        if self.vector_candidate_multiplier == 0 {
            return Err(ConfigError::invalid(
                "search.vector_candidate_multiplier",
                "must be >= 1",
            ));
        }
        Ok(())
    }
}
