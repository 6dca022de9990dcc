//! TF-IDF vector index settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_features() -> usize {
    5000
}
const fn default_ngram_max() -> usize {
    2
}
const fn default_ttl_secs() -> u64 {
    3600
}
const fn default_min_similarity() -> f64 {
    0.1
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct IndexConfig {
    /// Vocabulary cap; the most frequent terms across the corpus are kept.
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Longest n-gram in the vocabulary (1 = unigrams, 2 = uni+bigrams).
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,

    /// Snapshot age after which the next query rebuilds it.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Cosine similarity floor for vector hits.
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            ngram_max: default_ngram_max(),
            ttl_secs: default_ttl_secs(),
            min_similarity: default_min_similarity(),
        }
    }
}

impl IndexConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero vocabulary cap, an
    /// n-gram size outside `1..=2`, or a similarity floor outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_features == 0 {
            return Err(ConfigError::invalid("index.max_features", "must be >= 1"));
        }
        if !(1..=2).contains(&self.ngram_max) {
            return Err(ConfigError::invalid(
                "index.ngram_max",
                format!("{} is outside 1..=2", self.ngram_max),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(ConfigError::invalid(
                "index.min_similarity",
                format!("{} is outside [0, 1]", self.min_similarity),
            ));
        }
        Ok(())
    }
}
