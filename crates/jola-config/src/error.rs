//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment could not merge or extract the layered sources.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed by the requested command is missing required fields.
    /// `hint` names the environment variables that would fill it.
    #[error("Configuration section '{section}' is not configured; set {hint}")]
    NotConfigured { section: String, hint: String },

    /// A field is present but unusable (bad URL scheme, zero timeout).
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
