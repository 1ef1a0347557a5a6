use parley_config::ParleyConfig;

const SECTIONS: [(&str, &str); 4] = [
    ("INGEST", "BODY_MAX_CHARS"),
    ("TAXONOMY", "INDUSTRY"),
    ("INSIGHTS", "STORE_DIR"),
    ("GENERAL", "ORGANIZATION_ID"),
];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &ParleyConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ParleyConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    for (section, example) in SECTIONS {
        let single = format!("PARLEY_{section}_");
        let double = format!("PARLEY_{section}__");
        if env_keys
            .iter()
            .any(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            warnings.push(format!(
                "{section} config has PARLEY_{section}_* env vars with a single underscore. \
                 Use double underscores (example: {double}{example})."
            ));
        }
    }

    if config.general.organization_id.is_none() && env_keys.iter().any(|k| k == "PARLEY_ORG") {
        warnings.push(
            "PARLEY_ORG is not read. Use PARLEY_GENERAL__ORGANIZATION_ID or pass --org."
                .to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|k| ((*k).to_string(), String::from("x")))
            .collect()
    }

    #[test]
    fn warns_on_single_underscore_sections() {
        let warnings = collect_unconfigured_warnings(
            &ParleyConfig::default(),
            env(&["PARLEY_INGEST_BODY_MAX_CHARS", "PARLEY_TAXONOMY__INDUSTRY"]),
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("PARLEY_INGEST__BODY_MAX_CHARS"));
    }

    #[test]
    fn warns_on_unread_org_variable() {
        let warnings =
            collect_unconfigured_warnings(&ParleyConfig::default(), env(&["PARLEY_ORG"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("PARLEY_GENERAL__ORGANIZATION_ID"));
    }

    #[test]
    fn quiet_for_well_formed_env() {
        let warnings = collect_unconfigured_warnings(
            &ParleyConfig::default(),
            env(&["PARLEY_INSIGHTS__DEFAULT_DAYS", "PARLEY_LOG", "HOME"]),
        );
        assert!(warnings.is_empty());
    }
}
