//! System clipboard backed by `arboard`

use super::error::{Result, UiError};
use super::traits::Clipboard;

/// Opens the system clipboard on every copy
///
/// Headless sessions (no display server) fail at copy time rather than at
/// startup, so commands that never copy keep working.
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clipboard for ArboardClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| UiError::Clipboard(format!("Clipboard unavailable: {e}")))?;
        clipboard
            .set_text(text)
            .map_err(|e| UiError::Clipboard(e.to_string()))
    }
}
