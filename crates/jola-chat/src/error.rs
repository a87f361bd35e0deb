//! Chat client error types.

use jola_config::ConfigError;
use jola_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Transport failure talking to the chat service.
    #[error("chat service unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The chat service answered with a non-success status.
    #[error("chat service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("chat response decode error: {0}")]
    Decode(String),

    /// Reading or writing the persisted session id failed.
    #[error("session store error: {0}")]
    Store(String),

    /// Invalid input or an operation not allowed in the current state.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
