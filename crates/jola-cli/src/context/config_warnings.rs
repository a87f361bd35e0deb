use jola_config::{ENV_PREFIX, JolaConfig, SECTIONS};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &JolaConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &JolaConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();
    for section in SECTIONS {
        let upper = section.to_ascii_uppercase();
        let prefix = format!("{ENV_PREFIX}{upper}");
        let nested = format!("{prefix}__");
        let mistyped = env_keys
            .iter()
            .filter(|key| key.starts_with(&prefix) && !key.starts_with(&nested))
            .collect::<Vec<_>>();
        if mistyped.is_empty() {
            continue;
        }
        let suffix = if section == "supabase" && !config.supabase.is_configured() {
            " The feedback backend is still unconfigured."
        } else {
            ""
        };
        warnings.push(format!(
            "{} set but ignored. Use double underscores (example: {nested}{}).{suffix}",
            mistyped
                .iter()
                .map(|key| key.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            example_key(section),
        ));
    }

    warnings
}

fn example_key(section: &str) -> &'static str {
    match section {
        "supabase" => "URL",
        "chat" => "BASE_URL",
        _ => "DEFAULT_LIMIT",
    }
}

#[cfg(test)]
mod tests {
    use jola_config::{JolaConfig, SupabaseConfig};

    use super::collect_unconfigured_warnings;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), "value".to_string()))
            .collect()
    }

    #[test]
    fn warns_for_single_underscore_keys() {
        let warnings = collect_unconfigured_warnings(
            &JolaConfig::default(),
            env(&[
                "JOLA_SUPABASE_URL",
                "JOLA_CHAT_BASE_URL",
                "JOLA_GENERAL_DEFAULT_LIMIT",
            ]),
        );

        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("JOLA_SUPABASE__URL"));
        assert!(warnings[0].contains("still unconfigured"));
        assert!(warnings[1].contains("JOLA_CHAT__BASE_URL"));
    }

    #[test]
    fn does_not_warn_for_nested_keys() {
        let warnings = collect_unconfigured_warnings(
            &JolaConfig::default(),
            env(&["JOLA_SUPABASE__URL", "JOLA_CHAT__TIMEOUT_SECS", "JOLA_LOG", "PATH"]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn configured_backend_drops_the_unconfigured_note() {
        let config = JolaConfig {
            supabase: SupabaseConfig {
                url: "https://demo.supabase.co".into(),
                anon_key: "anon".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let warnings = collect_unconfigured_warnings(&config, env(&["JOLA_SUPABASE_SCHEMA"]));
        assert_eq!(warnings.len(), 1);
        assert!(!warnings[0].contains("still unconfigured"));
    }
}
