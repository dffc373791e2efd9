//! Recording render and clipboard collaborators for testing
//!
//! Clones share their log, so a test keeps one handle while the session
//! owns the other.

use std::cell::RefCell;
use std::rc::Rc;

use super::error::{Result, UiError};
use super::traits::{Clipboard, Renderer};
use super::types::{Notice, Overlay, OverlayKind, ResultCard};
use crate::api::{SmartSearchResponse, Topic};
use crate::session::{Highlight, PageButton};

/// One observed render call
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// `(id, favorite, selected)` per card
    Results(Vec<(String, bool, bool)>),
    Caption(String),
    Empty(String),
    SearchFailed(String),
    Pagination(Vec<PageButton>),
    /// `None` when the panel was hidden
    SmartResults(Option<SmartSearchResponse>),
    /// Overlay kind plus the dataset id or analysis title
    ShowOverlay(OverlayKind, String),
    HideOverlay(OverlayKind),
    Notice(Notice),
    Selection(Vec<String>),
    FavoriteMarker(String, bool),
    FavoritesCount(usize),
    Topics(Vec<Topic>),
    /// Highlight ids and the active index
    Highlights(Vec<String>, usize),
    Location(String),
    FillSearch(String),
    ScrollToTop,
    FocusSearch,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    events: Rc<RefCell<Vec<RenderEvent>>>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Most recent replaced location
    #[must_use]
    pub fn last_location(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            RenderEvent::Location(location) => Some(location.clone()),
            _ => None,
        })
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Notice(notice) => Some(notice.clone()),
                _ => None,
            })
            .collect()
    }

    /// Ids of the most recently rendered result list
    #[must_use]
    pub fn last_results(&self) -> Option<Vec<String>> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            RenderEvent::Results(cards) => Some(cards.iter().map(|(id, _, _)| id.clone()).collect()),
            _ => None,
        })
    }

    /// Whether any event satisfies `predicate`
    pub fn any(&self, predicate: impl Fn(&RenderEvent) -> bool) -> bool {
        self.events.borrow().iter().any(predicate)
    }

    fn push(&self, event: RenderEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl Renderer for RecordingRenderer {
    fn show_results(&mut self, cards: &[ResultCard<'_>]) {
        self.push(RenderEvent::Results(
            cards
                .iter()
                .map(|c| (c.record.id.clone(), c.favorite, c.selected))
                .collect(),
        ));
    }

    fn show_caption(&mut self, caption: &str) {
        self.push(RenderEvent::Caption(caption.to_string()));
    }

    fn show_empty(&mut self, message: &str) {
        self.push(RenderEvent::Empty(message.to_string()));
    }

    fn show_search_failed(&mut self, message: &str) {
        self.push(RenderEvent::SearchFailed(message.to_string()));
    }

    fn show_pagination(&mut self, buttons: &[PageButton]) {
        self.push(RenderEvent::Pagination(buttons.to_vec()));
    }

    fn show_smart_results(&mut self, smart: Option<&SmartSearchResponse>) {
        self.push(RenderEvent::SmartResults(smart.cloned()));
    }

    fn show_overlay(&mut self, overlay: Overlay<'_>) {
        let label = match overlay {
            Overlay::Detail(detail) => detail.id.clone(),
            Overlay::Analysis(view) => view.title.clone(),
        };
        self.push(RenderEvent::ShowOverlay(overlay.kind(), label));
    }

    fn hide_overlay(&mut self, kind: OverlayKind) {
        self.push(RenderEvent::HideOverlay(kind));
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.push(RenderEvent::Notice(notice.clone()));
    }

    fn show_selection(&mut self, ids: &[String]) {
        self.push(RenderEvent::Selection(ids.to_vec()));
    }

    fn show_favorite_marker(&mut self, id: &str, favorite: bool) {
        self.push(RenderEvent::FavoriteMarker(id.to_string(), favorite));
    }

    fn show_favorites_count(&mut self, count: usize) {
        self.push(RenderEvent::FavoritesCount(count));
    }

    fn show_topics(&mut self, topics: &[Topic]) {
        self.push(RenderEvent::Topics(topics.to_vec()));
    }

    fn show_highlights(&mut self, highlights: &[Highlight], active: usize) {
        self.push(RenderEvent::Highlights(
            highlights.iter().map(|h| h.id.clone()).collect(),
            active,
        ));
    }

    fn replace_location(&mut self, location: &str) {
        self.push(RenderEvent::Location(location.to_string()));
    }

    fn fill_search_input(&mut self, text: &str) {
        self.push(RenderEvent::FillSearch(text.to_string()));
    }

    fn scroll_to_top(&mut self) {
        self.push(RenderEvent::ScrollToTop);
    }

    fn focus_search(&mut self) {
        self.push(RenderEvent::FocusSearch);
    }
}

/// In-memory clipboard; `unavailable()` simulates a headless session
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
    unavailable: bool,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            contents: Rc::default(),
            unavailable: true,
        }
    }

    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if self.unavailable {
            return Err(UiError::Clipboard("no clipboard".into()));
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_log() {
        let recorder = RecordingRenderer::new();
        let mut owned = recorder.clone();

        owned.replace_location("/?q=wald");
        owned.focus_search();

        assert_eq!(recorder.last_location().as_deref(), Some("/?q=wald"));
        assert_eq!(recorder.events().len(), 2);
    }

    #[test]
    fn test_memory_clipboard() {
        let clipboard = MemoryClipboard::new();
        let mut owned = clipboard.clone();
        owned.copy("prompt").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("prompt"));

        let mut broken = MemoryClipboard::unavailable();
        assert!(broken.copy("x").is_err());
    }
}
