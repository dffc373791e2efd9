//! Store-specific error types
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`SerializeError`**: A set could not be encoded to or decoded from JSON
//! - **`CorruptValue`**: A stored value is not valid UTF-8

use thiserror::Error;

/// Key-value store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// JSON encoding or decoding failed
    #[error("Error during serialization: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Stored bytes for a key are not a UTF-8 string
    #[error("Stored value for '{0}' is not valid UTF-8")]
    CorruptValue(String),
}
