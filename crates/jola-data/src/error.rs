//! Remote data error types.

use jola_config::ConfigError;
use thiserror::Error;

/// Errors from remote queries.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or backend error message.
        message: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("decode error: {0}")]
    Decode(String),

    /// The backend is not configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DataError {
    /// Whether a read that failed this way is worth one more attempt.
    ///
    /// Transport failures, 429 and 5xx responses are transient; 4xx and
    /// decode errors are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(err) => !err.is_decode() && !err.is_builder(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Decode(_) | Self::Config(_) => false,
        }
    }
}
