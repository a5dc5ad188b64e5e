//! Error types for the salesdash server.

use std::path::PathBuf;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// IO error.
    #[error("IO error at {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// Unknown widget in a client update.
    #[error("Unknown widget: {0}")]
    UnknownWidget(String),

    /// Invalid bind address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

impl From<std::io::Error> for ServerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            message: e.to_string(),
        }
    }
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
