//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

const fn default_retry_reads() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default row limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Retry failed read queries once before reporting the error.
    #[serde(default = "default_retry_reads")]
    pub retry_reads: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            retry_reads: default_retry_reads(),
        }
    }
}
