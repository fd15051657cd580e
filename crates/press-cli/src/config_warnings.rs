use press_config::{PressConfig, StoreBackend};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &PressConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &PressConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.gemini.is_configured() && has_env_prefix(&env_keys, "PRESS_GEMINI") {
        warnings.push(
            "Gemini config appears default while PRESS_GEMINI* env vars exist. Use double underscores (example: PRESS_GEMINI__API_KEY)."
                .to_string(),
        );
    }

    if config.store.backend == StoreBackend::Memory && has_env_prefix(&env_keys, "PRESS_STORE") {
        warnings.push(
            "Store backend is memory while PRESS_STORE* env vars exist. Use double underscores (example: PRESS_STORE__BACKEND=jsonl)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn single_underscore_gemini_key_is_flagged() {
        let config = PressConfig::default();
        let warnings =
            collect_unconfigured_warnings(&config, env(&[("PRESS_GEMINI_API_KEY", "abc")]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("PRESS_GEMINI__API_KEY"));
    }

    #[test]
    fn configured_sections_are_quiet() {
        let mut config = PressConfig::default();
        config.gemini.api_key = "abc".to_string();
        let warnings =
            collect_unconfigured_warnings(&config, env(&[("PRESS_GEMINI__API_KEY", "abc")]));
        assert!(warnings.is_empty());
    }

    #[test]
    fn store_typo_is_flagged() {
        let warnings = collect_unconfigured_warnings(
            &PressConfig::default(),
            env(&[("PRESS_STORE_BACKEND", "jsonl")]),
        );
        assert_eq!(warnings.len(), 1);
    }
}
