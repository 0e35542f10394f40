//! Error types for the Agentic Chat domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! The responder itself is total; these cover building it and guarding it.

use thiserror::Error;

/// The top-level error type for all Agentic Chat operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Configuration errors (fatal at startup) ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Input errors (rejected at the boundary) ---
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Problems with a caller-supplied payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid message at index {index}: {reason}")]
    InvalidMessage { index: usize, reason: String },
}
