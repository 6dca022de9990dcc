//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use medkb_config::{ConfigError, MedkbConfig};

#[test]
fn loads_search_weights_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[search]
lexical_weight = 0.7
semantic_weight = 0.3
title_weight = 4.0
verified_multiplier = 1.5
view_bonus_cap = 0.25
min_score = 0.2
default_limit = 25
"#,
        )?;

        let config: MedkbConfig = Figment::from(Serialized::defaults(MedkbConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!((config.search.lexical_weight - 0.7).abs() < f64::EPSILON);
        assert!((config.search.semantic_weight - 0.3).abs() < f64::EPSILON);
        assert!((config.search.title_weight - 4.0).abs() < f64::EPSILON);
        assert!((config.search.verified_multiplier - 1.5).abs() < f64::EPSILON);
        assert!((config.search.view_bonus_cap - 0.25).abs() < f64::EPSILON);
        assert!((config.search.min_score - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.search.default_limit, 25);
        // Untouched fields keep their defaults
        assert!((config.search.keyword_weight - 2.0).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn loads_index_and_symptom_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[index]
max_features = 1000
ngram_max = 1
ttl_secs = 60
min_similarity = 0.05

[symptoms]
match_threshold = 80
max_related_diseases = 3
"#,
        )?;

        let config: MedkbConfig = Figment::from(Serialized::defaults(MedkbConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.index.max_features, 1000);
        assert_eq!(config.index.ngram_max, 1);
        assert_eq!(config.index.ttl_secs, 60);
        assert!((config.index.min_similarity - 0.05).abs() < f64::EPSILON);
        assert!((config.symptoms.match_threshold - 80.0).abs() < f64::EPSILON);
        assert_eq!(config.symptoms.max_related_diseases, 3);
        assert_eq!(config.symptoms.max_recommendations, 5);
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".medkb"))
            .map_err(|e| e.to_string())?;
        jail.create_file(
            ".medkb/config.toml",
            r#"
[general]
corpus_path = "data/corpus.json"

[index]
ttl_secs = 120
"#,
        )?;

        let config = MedkbConfig::load().expect("config loads");
        assert_eq!(config.index.ttl_secs, 120);
        assert!(config.general.is_configured());
        Ok(())
    });
}

#[test]
fn invalid_toml_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[index]
min_similarity = 1.5
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(MedkbConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = MedkbConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "index.min_similarity"));
        Ok(())
    });
}

#[test]
fn malformed_value_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[index]
max_features = "lots"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(MedkbConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = MedkbConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("MEDKB_SEARCH__TITLE_WEIGHT", "5.0");

        jail.create_file(
            "config.toml",
            r#"
[search]
title_weight = 4.0
body_weight = 0.5
"#,
        )?;

        let config: MedkbConfig = Figment::from(Serialized::defaults(MedkbConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("MEDKB_").split("__"))
            .extract()?;

        // Env should win over TOML
        assert!((config.search.title_weight - 5.0).abs() < f64::EPSILON);
        // TOML value not overridden by env should remain
        assert!((config.search.body_weight - 0.5).abs() < f64::EPSILON);
        Ok(())
    });
}

/// Documents the figment gotcha: typo'd env var keys are silently ignored.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("MEDKB_INDEX__TTL_SEC", "5");

        let config: MedkbConfig = Figment::from(Serialized::defaults(MedkbConfig::default()))
            .merge(Env::prefixed("MEDKB_").split("__"))
            .extract()?;

        assert_eq!(
            config.index.ttl_secs, 3600,
            "typo'd env var should be silently ignored by figment"
        );
        Ok(())
    });
}
