use medkb_config::MedkbConfig;

const SECTIONS: [&str; 4] = ["SEARCH", "INDEX", "SYMPTOMS", "GENERAL"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &MedkbConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &MedkbConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    for section in SECTIONS {
        let single = format!("MEDKB_{section}_");
        let double = format!("MEDKB_{section}__");
        if env_keys
            .iter()
            .any(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            warnings.push(format!(
                "{single}* env vars are ignored. Use double underscores (example: {double}{}).",
                example_field(section)
            ));
        }
    }

    if !config.general.is_configured() && has_env_prefix(&env_keys, "MEDKB_CORPUS") {
        warnings.push(
            "MEDKB_CORPUS* is not read. Set MEDKB_GENERAL__CORPUS_PATH or pass --corpus."
                .to_string(),
        );
    }

    warnings
}

fn example_field(section: &str) -> &'static str {
    match section {
        "SEARCH" => "MIN_SCORE",
        "INDEX" => "TTL_SECS",
        "SYMPTOMS" => "MATCH_THRESHOLD",
        _ => "CORPUS_PATH",
    }
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
