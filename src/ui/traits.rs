//! Capability traits for everything the session shows or copies

use super::error::Result;
use super::types::{Notice, Overlay, OverlayKind, ResultCard};
use crate::api::{SmartSearchResponse, Topic};
use crate::session::{Highlight, PageButton};

/// Visual side of the session
///
/// The session never produces markup or terminal output itself; every
/// visible change goes through one of these calls. Implementations decide
/// how (or whether) to present each one.
pub trait Renderer {
    /// Replace the result list
    fn show_results(&mut self, cards: &[ResultCard<'_>]);

    /// Result-count caption above the list
    fn show_caption(&mut self, caption: &str);

    /// Inline empty state shown in place of the list
    fn show_empty(&mut self, message: &str);

    /// Retryable failure state for the primary search
    fn show_search_failed(&mut self, message: &str);

    /// Pagination control; an empty slice hides it
    fn show_pagination(&mut self, buttons: &[PageButton]);

    /// Concept-matching side panel; `None` hides it
    fn show_smart_results(&mut self, smart: Option<&SmartSearchResponse>);

    fn show_overlay(&mut self, overlay: Overlay<'_>);

    fn hide_overlay(&mut self, kind: OverlayKind);

    fn show_notice(&mut self, notice: &Notice);

    /// Card highlighting and the selection action bar
    fn show_selection(&mut self, ids: &[String]);

    /// Favorite marker on a single card
    fn show_favorite_marker(&mut self, id: &str, favorite: bool);

    fn show_favorites_count(&mut self, count: usize);

    /// Options of the topic filter
    fn show_topics(&mut self, topics: &[Topic]);

    /// Carousel cards with the initially active one
    fn show_highlights(&mut self, highlights: &[Highlight], active: usize);

    /// Replace the address bar location without adding history
    fn replace_location(&mut self, location: &str);

    fn fill_search_input(&mut self, text: &str);

    fn scroll_to_top(&mut self) {}

    fn focus_search(&mut self) {}
}

/// System clipboard
pub trait Clipboard {
    /// Put `text` on the clipboard
    ///
    /// # Errors
    ///
    /// Returns [`super::UiError::Clipboard`] when the clipboard is
    /// unavailable.
    fn copy(&mut self, text: &str) -> Result<()>;
}
