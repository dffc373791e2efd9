//! View types passed from the session to render collaborators

use std::fmt;

use crate::api::{DatasetDetail, Record};
use crate::session::AnalysisView;

/// The two mutually exclusive overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Dataset detail modal
    Detail,
    /// Combinability analysis panel
    Analysis,
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detail => write!(f, "detail"),
            Self::Analysis => write!(f, "analysis"),
        }
    }
}

/// Payload of an overlay being shown
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    Detail(&'a DatasetDetail),
    Analysis(&'a AnalysisView),
}

impl Overlay<'_> {
    #[must_use]
    pub const fn kind(&self) -> OverlayKind {
        match self {
            Self::Detail(_) => OverlayKind::Detail,
            Self::Analysis(_) => OverlayKind::Analysis,
        }
    }
}

/// Message level for categorizing notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast or, when `blocking`, a modal message the user must dismiss
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: MessageLevel,
    pub text: String,
    pub blocking: bool,
}

impl Notice {
    fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            blocking: false,
        }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, text)
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, text)
    }

    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, text)
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, text)
    }

    /// Precondition message that interrupts the user
    #[must_use]
    pub fn blocking(text: impl Into<String>) -> Self {
        Self {
            blocking: true,
            ..Self::new(MessageLevel::Warning, text)
        }
    }
}

/// One card of the result list
#[derive(Debug, Clone, Copy)]
pub struct ResultCard<'a> {
    pub record: &'a Record,
    pub favorite: bool,
    pub selected: bool,
}
