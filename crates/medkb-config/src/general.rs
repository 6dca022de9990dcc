//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default JSON corpus snapshot the CLI loads when `--corpus` is absent.
    /// Empty means unset.
    #[serde(default)]
    pub corpus_path: String,
}

impl GeneralConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.corpus_path.trim().is_empty()
    }

    /// Corpus path or a `NotConfigured` error naming the env var to set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when no corpus path is set.
    pub fn require_corpus_path(&self) -> Result<PathBuf, ConfigError> {
        if self.is_configured() {
            Ok(PathBuf::from(self.corpus_path.trim()))
        } else {
            Err(ConfigError::NotConfigured {
                field: "general.corpus_path (MEDKB_GENERAL__CORPUS_PATH)".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_corpus_path_is_not_configured() {
        let config = GeneralConfig::default();
        assert!(!config.is_configured());
        assert!(matches!(
            config.require_corpus_path(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn corpus_path_is_trimmed() {
        let config = GeneralConfig {
            corpus_path: "  data/corpus.json ".to_string(),
        };
        assert_eq!(
            config.require_corpus_path().unwrap(),
            PathBuf::from("data/corpus.json")
        );
    }
}
