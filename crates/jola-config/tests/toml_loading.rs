//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use std::path::Path;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use jola_config::JolaConfig;

#[test]
fn loads_supabase_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[supabase]
url = "https://abcd.supabase.co"
anon_key = "anon-key"
schema = "analytics"
"#,
        )?;

        let config: JolaConfig = Figment::from(Serialized::defaults(JolaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.supabase.url, "https://abcd.supabase.co");
        assert_eq!(config.supabase.anon_key, "anon-key");
        assert_eq!(config.supabase.schema, "analytics");
        assert!(config.supabase.is_configured());
        Ok(())
    });
}

#[test]
fn loads_chat_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[chat]
base_url = "https://chat.example.com"
timeout_secs = 15
session_file = "/var/lib/jola/session"
"#,
        )?;

        let config: JolaConfig = Figment::from(Serialized::defaults(JolaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.chat.base_url, "https://chat.example.com");
        assert_eq!(config.chat.timeout_secs, 15);
        assert_eq!(
            config.chat.session_file_path().as_deref(),
            Some(Path::new("/var/lib/jola/session"))
        );
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
default_limit = 50
"#,
        )?;

        let config: JolaConfig = Figment::from(Serialized::defaults(JolaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.default_limit, 50);
        assert!(config.general.retry_reads);
        assert_eq!(config.chat.base_url, "http://localhost:8000");
        assert_eq!(config.supabase.schema, "public");
        Ok(())
    });
}

#[test]
fn project_file_beats_global_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "global.toml",
            r#"
[supabase]
url = "https://global.supabase.co"
anon_key = "global-key"

[general]
default_limit = 10
"#,
        )?;
        jail.create_dir(".jola")?;
        jail.create_file(
            ".jola/config.toml",
            r#"
[supabase]
url = "https://project.supabase.co"
"#,
        )?;

        let config: JolaConfig = JolaConfig::figment_with(
            Some(Path::new("global.toml")),
            Path::new(".jola/config.toml"),
        )
        .extract()?;

        assert_eq!(config.supabase.url, "https://project.supabase.co");
        assert_eq!(config.supabase.anon_key, "global-key");
        assert_eq!(config.general.default_limit, 10);
        Ok(())
    });
}

#[test]
fn malformed_toml_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[general\ndefault_limit = 5")?;

        let result = JolaConfig::figment_with(None, Path::new("config.toml")).extract::<JolaConfig>();
        assert!(result.is_err());
        Ok(())
    });
}
