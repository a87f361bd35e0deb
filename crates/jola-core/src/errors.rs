//! Cross-cutting error types for Jola.
//!
//! Remote-access errors live with the crates that talk to the network
//! (`DataError` in `jola-data`, `ChatError` in `jola-chat`). The binary
//! converges everything through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Jola crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        from: String,
        to: String,
    },

    /// Data failed validation (format, constraints, empty input).
    #[error("Validation error: {0}")]
    Validation(String),
}
