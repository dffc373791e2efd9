//! Session error types

use thiserror::Error;

use crate::api::ApiError;
use crate::store::StoreError;
use crate::ui::UiError;

/// Errors returned by session operations
///
/// Precondition variants are raised before any request is sent.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Catalog request failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Favorites could not be persisted
    #[error("Favorites store error: {0}")]
    Store(#[from] StoreError),

    /// Clipboard or renderer failure
    #[error(transparent)]
    Ui(#[from] UiError),

    /// Combination analysis needs more selected records
    #[error("At least {required} records must be selected, got {actual}")]
    SelectionTooSmall { required: usize, actual: usize },

    /// An operation needs at least one selected record
    #[error("No records selected")]
    NoSelection,

    /// There is no text to copy
    #[error("Nothing to copy: {0}")]
    NothingToCopy(String),

    /// Index outside the rendered result list
    #[error("No result at position {0}")]
    NoSuchResult(usize),

    /// Index outside the highlight list
    #[error("No highlight at position {0}")]
    NoSuchHighlight(usize),

    /// Session could not be assembled
    #[error("Failed to build session: {0}")]
    BuildError(String),
}

impl SessionError {
    /// Whether the session already showed this failure through the renderer
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        matches!(
            self,
            Self::Api(_)
                | Self::Ui(_)
                | Self::SelectionTooSmall { .. }
                | Self::NoSelection
                | Self::NothingToCopy(_)
        )
    }
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
