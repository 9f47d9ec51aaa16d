use obe_config::ObeConfig;

const SECTIONS: [(&str, &str); 3] = [
    ("OBE_GENERAL", "OBE_GENERAL__DATASET"),
    ("OBE_ATTAINMENT", "OBE_ATTAINMENT__TARGET_PERCENTAGE"),
    ("OBE_SURVEY", "OBE_SURVEY__FALLBACK_RATING"),
];

/// Emit warnings for likely mistyped env var keys that figment ignores.
pub fn warn_unconfigured(config: &ObeConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ObeConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.general.has_dataset() && has_env_prefix(&env_keys, "OBE_DATASET") {
        warnings.push(
            "general.dataset is unset while OBE_DATASET* env vars exist. Use the section name (example: OBE_GENERAL__DATASET)."
                .to_string(),
        );
    }

    for (section, example) in SECTIONS {
        if has_single_underscore_key(&env_keys, section) {
            warnings.push(format!(
                "{section}_* env vars are ignored. Use double underscores (example: {example})."
            ));
        }
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    let single = format!("{section}_");
    let double = format!("{section}__");
    keys.iter()
        .any(|key| key.starts_with(&single) && !key.starts_with(&double))
}
