//! # jola-config
//!
//! Layered configuration loading for Jola using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`JOLA_*` prefix, `__` as separator)
//! 2. Project-level `.jola/config.toml`
//! 3. User-level `~/.config/jola/config.toml`
//! 4. Built-in defaults
//!
//! `JOLA_SUPABASE__ANON_KEY` maps to `supabase.anon_key`,
//! `JOLA_CHAT__BASE_URL` to `chat.base_url`, and so on.
//!
//! ```no_run
//! use jola_config::JolaConfig;
//!
//! let config = JolaConfig::load_with_dotenv().expect("config");
//! if config.supabase.is_configured() {
//!     println!("backend: {}", config.supabase.base_url());
//! }
//! ```

mod chat;
mod error;
mod general;
mod supabase;

pub use chat::ChatConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use supabase::SupabaseConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for every config key.
pub const ENV_PREFIX: &str = "JOLA_";

/// Top-level config sections, used to spot mistyped env vars.
pub const SECTIONS: [&str; 3] = ["supabase", "chat", "general"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JolaConfig {
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl JolaConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` (current directory or nearest parent) first, then
    /// everything [`Self::load`] reads. Existing env vars are not replaced.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source is malformed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or stack providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with(Self::global_config_path().as_deref(), Path::new(".jola/config.toml"))
    }

    /// Provider chain with explicit file locations. Missing files are skipped.
    #[must_use]
    pub fn figment_with(global: Option<&Path>, local: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = global.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        if local.exists() {
            figment = figment.merge(Toml::file(local));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jola").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = JolaConfig::default();
        assert!(!config.supabase.is_configured());
        assert!(config.chat.is_configured());
        assert!(config.general.retry_reads);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: JolaConfig = JolaConfig::figment_with(None, Path::new("missing.toml"))
                .extract()
                .expect("should extract defaults");
            assert!(!config.supabase.is_configured());
            assert_eq!(config.general.default_limit, 20);
            assert_eq!(config.chat.timeout_secs, 60);
            Ok(())
        });
    }

    #[test]
    fn global_file_outside_project_is_layered_under_local() {
        let home = tempfile::tempdir().expect("tempdir");
        let global = home.path().join("config.toml");
        std::fs::write(
            &global,
            "[general]\ndefault_limit = 50\nretry_reads = false\n\n[chat]\ntimeout_secs = 5\n",
        )
        .expect("write global config");

        figment::Jail::expect_with(|jail| {
            jail.create_dir(".jola")?;
            jail.create_file(".jola/config.toml", "[general]\ndefault_limit = 10\n")?;
            let config: JolaConfig =
                JolaConfig::figment_with(Some(&global), Path::new(".jola/config.toml"))
                    .extract()
                    .expect("should extract");
            assert_eq!(config.general.default_limit, 10);
            assert!(!config.general.retry_reads);
            assert_eq!(config.chat.timeout_secs, 5);
            Ok(())
        });
    }
}
