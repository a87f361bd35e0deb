//! Chat service configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    String::from("http://localhost:8000")
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    /// Base URL of the chat service; `/chat` routes hang off it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request transport timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// File holding the persisted session id. Empty means the default
    /// location under the user data directory.
    #[serde(default)]
    pub session_file: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            session_file: String::new(),
        }
    }
}

impl ChatConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Explicit session file path, if one was configured.
    #[must_use]
    pub fn session_file_path(&self) -> Option<PathBuf> {
        let trimmed = self.session_file.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    /// # Errors
    ///
    /// `NotConfigured` without a base URL, `InvalidValue` for a zero timeout.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "chat".into(),
                hint: "JOLA_CHAT__BASE_URL".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chat.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(self)
    }
}
