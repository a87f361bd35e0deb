//! Hosted backend (Supabase/PostgREST) configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_schema() -> String {
    String::from("public")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g., `https://abcd.supabase.co`). The REST path is
    /// appended by the client.
    #[serde(default)]
    pub url: String,

    /// Public anon key, sent as both `apikey` and bearer token.
    #[serde(default)]
    pub anon_key: String,

    /// Database schema exposed through the REST interface.
    #[serde(default = "default_schema")]
    pub schema: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            schema: default_schema(),
        }
    }
}

impl SupabaseConfig {
    /// Check if both the URL and key are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }

    /// Project URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }

    /// Fail fast before any remote call when the backend is not usable.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when the URL or key is missing, `InvalidValue` when
    /// the URL is not http(s).
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "supabase".into(),
                hint: "JOLA_SUPABASE__URL and JOLA_SUPABASE__ANON_KEY".into(),
            });
        }
        let url = self.base_url();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "supabase.url".into(),
                reason: format!("expected an http(s) URL, got '{url}'"),
            });
        }
        Ok(self)
    }
}
