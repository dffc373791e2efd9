//! Catalog API error types
//!
//! Distinguishes the ways a request to the remote catalog can fail so the
//! session can tell "the request failed" apart from "no results".
//!
//! # Error Types
//!
//! - **`Transport`**: Connection or protocol failure from `reqwest`
//! - **`Timeout`**: The request did not complete within the configured limit
//! - **`Status`**: The server answered with a non-success HTTP status
//! - **`Decode`**: The response body was not the expected JSON shape

use thiserror::Error;

/// Errors from the catalog read API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connection refused, TLS, ...)
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    /// Request exceeded the configured timeout
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    /// Non-success HTTP status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Unexpected response body
    #[error("Could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Invalid base URL or request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Classify a `reqwest` error for the given endpoint
    pub(crate) fn from_reqwest(endpoint: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            }
        } else {
            Self::Transport {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Whether retrying the same request may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode { .. } | Self::InvalidRequest(_) => false,
        }
    }
}
