//! Symptom checker thresholds.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_match_threshold() -> f64 {
    70.0
}
const fn default_max_related_diseases() -> usize {
    5
}
const fn default_max_recommendations() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SymptomConfig {
    /// A phrase matches a catalog symptom only when similarity exceeds this
    /// (0–100 scale).
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    #[serde(default = "default_max_related_diseases")]
    pub max_related_diseases: usize,

    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
}

impl Default for SymptomConfig {
    fn default() -> Self {
        Self {
            match_threshold: default_match_threshold(),
            max_related_diseases: default_max_related_diseases(),
            max_recommendations: default_max_recommendations(),
        }
    }
}

impl SymptomConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a threshold outside `[0, 100]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.match_threshold) {
            return Err(ConfigError::invalid(
                "symptoms.match_threshold",
                format!("{} is outside [0, 100]", self.match_threshold),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SymptomConfig::default();
        assert!((config.match_threshold - 70.0).abs() < f64::EPSILON);
        assert_eq!(config.max_related_diseases, 5);
        assert_eq!(config.max_recommendations, 5);
    }

    #[test]
    fn threshold_above_100_is_rejected() {
        let config = SymptomConfig {
            match_threshold: 120.0,
            ..SymptomConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
