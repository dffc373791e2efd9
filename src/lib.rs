//! inspire-finder - client-side state engine for the INSPIRE Austria catalog
//!
//! This library keeps the state of a catalog search session (query,
//! filters, pagination, multi-selection, favorites, shareable URL,
//! highlight carousel and combination analysis) and drives a renderer
//! through it. The catalog API, persistence and clipboard are injected.

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod config;
pub mod keybinds;
pub mod session;
pub mod store;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum FinderError {
    /// Catalog request failed
    #[error("API error: {0}")]
    Api(#[from] api::ApiError),
    /// Favorites store error
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
    /// Session operation failed
    #[error(transparent)]
    Session(#[from] session::SessionError),
    /// Renderer or clipboard failure
    #[error("UI error: {0}")]
    Ui(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
