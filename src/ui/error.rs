//! UI error types

use thiserror::Error;

/// Errors raised by render and clipboard collaborators
#[derive(Debug, Error)]
pub enum UiError {
    /// The system clipboard is unavailable or rejected the write
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// IO error while writing to the terminal
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
