//! The search session
//!
//! [`Session`] owns every piece of client state (query, selection,
//! favorites, URL, open overlay) and routes all mutation through named
//! operations. Each operation updates state first, then issues the
//! matching render calls, so the renderer never sees a half-applied
//! transition.
//!
//! # Workflow
//!
//! ```text
//! user input ─→ QueryState / SelectionModel mutation
//!                   ↓
//!             begin_search()  (sequence number issued)
//!                   ↓
//!     ┌─────────────┴─────────────┐
//!  search                   smart-search (non-empty query only)
//!     ↓                           ↓
//!  apply_search()          apply only if still current
//!     ↓
//!  results + total replaced, anchor dropped, list/pagination/caption
//!  rendered, URL `q` replaced
//! ```

use std::sync::Arc;

use futures::future::{self, Either, join_all};
use tracing::{debug, info, warn};

use super::analysis::AnalysisView;
use super::error::{Result, SessionError};
use super::highlights::{Highlight, HighlightKind, build_highlights};
use super::carousel::Carousel;
use super::query::{FilterKind, QueryState, SearchRequest};
use super::selection::SelectionModel;
use super::url_sync::{InitialView, UrlParam, UrlSync};
use crate::api::{
    self, CatalogApi, CombineResponse, CombineTarget, DatasetDetail, Record, SearchResponse,
    SmartSearchResponse, Topic,
};
use crate::keybinds::{Focus, Key, KeyAction, resolve_key};
use crate::store::{FavoritesSet, KeyValueStore};
use crate::ui::{Clipboard, Notice, Overlay, OverlayKind, Renderer, ResultCard};

/// Minimum selection size for a combination analysis
pub const MIN_COMBINE_SELECTION: usize = 2;

const EMPTY_RESULTS: &str = "Keine Ergebnisse gefunden.";
const EMPTY_FAVORITES: &str = "Noch keine Favoriten gespeichert.";

/// A search that has been issued but not yet applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub seq: u64,
    pub request: SearchRequest,
}

/// What happened to a search response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were replaced; `total` is the new server count
    Applied { total: usize },
    /// A newer search was issued meanwhile; the response was dropped
    Stale,
}

/// Maximum highlight entries per source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightLimits {
    pub concepts: usize,
    pub gems: usize,
}

impl Default for HighlightLimits {
    fn default() -> Self {
        Self { concepts: 4, gems: 8 }
    }
}

/// Which list the result area currently shows
#[derive(Debug, Clone)]
enum ListView {
    Search,
    Favorites(Vec<Record>),
}

/// Builder for [`Session`]
#[derive(Default)]
pub struct SessionBuilder {
    api: Option<Arc<dyn CatalogApi>>,
    renderer: Option<Box<dyn Renderer>>,
    clipboard: Option<Box<dyn Clipboard>>,
    store: Option<Box<dyn KeyValueStore>>,
    page_size: Option<usize>,
    share_base_url: Option<String>,
    highlight_limits: HighlightLimits,
}

impl SessionBuilder {
    #[must_use]
    pub fn api(mut self, api: Arc<dyn CatalogApi>) -> Self {
        self.api = Some(api);
        self
    }

    #[must_use]
    pub fn renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    #[must_use]
    pub fn clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// Key-value store holding the favorites
    #[must_use]
    pub fn store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub const fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Root of links produced by [`Session::copy_share_link`]
    #[must_use]
    pub fn share_base_url(mut self, url: impl Into<String>) -> Self {
        self.share_base_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn highlight_limits(mut self, limits: HighlightLimits) -> Self {
        self.highlight_limits = limits;
        self
    }

    /// Assemble the session and load favorites
    ///
    /// # Errors
    ///
    /// Returns `SessionError::BuildError` if a collaborator is missing, or
    /// `SessionError::Store` if favorites cannot be read.
    pub fn build(self) -> Result<Session> {
        let api = self
            .api
            .ok_or_else(|| SessionError::BuildError("catalog API is required".into()))?;
        let renderer = self
            .renderer
            .ok_or_else(|| SessionError::BuildError("renderer is required".into()))?;
        let clipboard = self
            .clipboard
            .ok_or_else(|| SessionError::BuildError("clipboard is required".into()))?;
        let store = self
            .store
            .ok_or_else(|| SessionError::BuildError("favorites store is required".into()))?;

        let page_size = self.page_size.unwrap_or(20);
        if page_size == 0 {
            return Err(SessionError::BuildError("page size must be greater than 0".into()));
        }

        let favorites = FavoritesSet::load(store)?;
        debug!(favorites = favorites.len(), page_size, "session created");

        Ok(Session {
            api,
            renderer,
            clipboard,
            favorites,
            query: QueryState::new(page_size),
            selection: SelectionModel::new(),
            url: UrlSync::default(),
            overlay: None,
            detail: None,
            analysis: None,
            highlights: Vec::new(),
            highlight_limits: self.highlight_limits,
            topics: Vec::new(),
            view: ListView::Search,
            search_seq: 0,
            share_base_url: self.share_base_url.unwrap_or_default(),
        })
    }
}

/// Client-side state engine of the catalog search page
pub struct Session {
    api: Arc<dyn CatalogApi>,
    renderer: Box<dyn Renderer>,
    clipboard: Box<dyn Clipboard>,
    favorites: FavoritesSet,
    query: QueryState,
    selection: SelectionModel,
    url: UrlSync,
    overlay: Option<OverlayKind>,
    detail: Option<DatasetDetail>,
    analysis: Option<AnalysisView>,
    highlights: Vec<Highlight>,
    highlight_limits: HighlightLimits,
    topics: Vec<Topic>,
    view: ListView,
    search_seq: u64,
    share_base_url: String,
}

impl Session {
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    #[must_use]
    pub const fn query(&self) -> &QueryState {
        &self.query
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    /// Current location, including the path
    #[must_use]
    pub fn location(&self) -> String {
        self.url.location()
    }

    #[must_use]
    pub const fn open_overlay(&self) -> Option<OverlayKind> {
        self.overlay
    }

    /// Detail shown in the open detail overlay
    #[must_use]
    pub fn detail(&self) -> Option<&DatasetDetail> {
        self.detail.as_ref()
    }

    /// Analysis shown in the open analysis overlay
    #[must_use]
    pub fn analysis(&self) -> Option<&AnalysisView> {
        self.analysis.as_ref()
    }

    #[must_use]
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Rotation state for the loaded highlights, if any
    #[must_use]
    pub fn carousel(&self) -> Option<Carousel> {
        Carousel::new(self.highlights.clone())
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Records of the list currently shown (search page or favorites)
    #[must_use]
    pub fn visible_records(&self) -> &[Record] {
        match &self.view {
            ListView::Search => self.query.results(),
            ListView::Favorites(records) => records,
        }
    }

    // ---- startup -------------------------------------------------------

    /// Apply the initial view requested by `location`
    ///
    /// Runs once at startup. At most one of `dataset`, `concept`, `q`
    /// drives the view, in that priority; without any of them an
    /// unfiltered search runs.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the location selects.
    pub async fn restore(&mut self, location: &str) -> Result<()> {
        self.url = UrlSync::parse(location);
        let view = self.url.initial_view();
        info!(?view, "restoring initial view");

        match view {
            InitialView::Dataset(id) => self.open_detail(&id).await,
            InitialView::Concept(id) => self.open_concept_by_id(&id).await,
            InitialView::Search(text) => {
                self.renderer.fill_search_input(&text);
                self.query.query = text;
                self.query.reset_offset();
                self.search().await.map(|_| ())
            }
            InitialView::Default => self.search().await.map(|_| ()),
        }
    }

    // ---- search --------------------------------------------------------

    /// Run a search for the current query state
    ///
    /// Closes any open overlay first. For a non-empty query the smart
    /// search runs alongside the main search; its failure only hides the
    /// side panel.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if the main search fails. The failure is
    /// rendered as a retryable state and the previous results are kept.
    pub async fn search(&mut self) -> Result<SearchOutcome> {
        self.close_overlay();

        let pending = self.begin_search();
        let api = Arc::clone(&self.api);
        let main = api.search(&pending.request);

        let Some(text) = pending.request.query.clone() else {
            self.renderer.show_smart_results(None);
            return self.apply_search(&pending, main.await);
        };
        let smart = api.smart_search(&text);

        match future::select(main, smart).await {
            Either::Left((result, smart)) => {
                let outcome = self.apply_search(&pending, result);
                self.apply_smart(pending.seq, smart.await);
                outcome
            }
            Either::Right((smart, main)) => {
                self.apply_smart(pending.seq, smart);
                self.apply_search(&pending, main.await)
            }
        }
    }

    /// Issue a sequence number for the current query state
    ///
    /// Any response belonging to an earlier number is dropped by
    /// [`Self::apply_search`].
    pub fn begin_search(&mut self) -> PendingSearch {
        self.search_seq += 1;
        let pending = PendingSearch {
            seq: self.search_seq,
            request: self.query.request(),
        };
        debug!(seq = pending.seq, request = ?pending.request, "search issued");
        pending
    }

    /// Apply a search response, unless a newer search was issued
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` for a failed current search.
    pub fn apply_search(
        &mut self,
        pending: &PendingSearch,
        result: api::Result<SearchResponse>,
    ) -> Result<SearchOutcome> {
        if pending.seq != self.search_seq {
            debug!(seq = pending.seq, latest = self.search_seq, "discarding stale search response");
            return Ok(SearchOutcome::Stale);
        }

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "search failed");
                self.renderer.show_search_failed(&e.to_string());
                return Err(e.into());
            }
        };

        let total = response.total;
        self.query.replace_results(response.results, total);
        self.view = ListView::Search;
        self.selection.invalidate_anchor();
        debug!(seq = pending.seq, total, "search applied");

        self.renderer.show_caption(&self.query.caption());
        self.render_list();
        self.renderer.show_pagination(&self.query.pagination().buttons());

        if let Some(text) = &pending.request.query {
            self.url.set(UrlParam::Query, text);
            self.sync_location();
        }

        Ok(SearchOutcome::Applied { total })
    }

    fn apply_smart(&mut self, seq: u64, result: api::Result<SmartSearchResponse>) {
        if seq != self.search_seq {
            debug!(seq, "discarding stale smart-search response");
            return;
        }
        match result {
            Ok(smart) => self.renderer.show_smart_results(Some(&smart)),
            Err(e) => {
                warn!(error = %e, "smart search failed");
                self.renderer.show_smart_results(None);
            }
        }
    }

    /// Set the free text and search from the first page
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn submit_query(&mut self, text: &str) -> Result<SearchOutcome> {
        self.query.query = text.to_string();
        self.query.reset_offset();
        self.search().await
    }

    /// Change one filter and search from the first page
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn set_filter(&mut self, filter: FilterKind, value: &str) -> Result<SearchOutcome> {
        self.query.filters.set(filter, value);
        self.query.reset_offset();
        self.search().await
    }

    /// Replace text, filters and page at once, then search
    ///
    /// Filters not listed are cleared.
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn run_query(
        &mut self,
        text: &str,
        filters: &[(FilterKind, &str)],
        page: usize,
    ) -> Result<SearchOutcome> {
        self.query.query = text.to_string();
        self.query.filters.clear();
        for (filter, value) in filters {
            self.query.filters.set(*filter, value);
        }
        self.query.set_page(page.max(1));
        self.search().await
    }

    /// Drop every filter and search from the first page
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn clear_filters(&mut self) -> Result<SearchOutcome> {
        self.query.filters.clear();
        self.query.reset_offset();
        self.search().await
    }

    /// Jump to 1-based `page` and scroll to the top
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn go_to_page(&mut self, page: usize) -> Result<SearchOutcome> {
        self.query.set_page(page);
        let outcome = self.search().await;
        self.renderer.scroll_to_top();
        outcome
    }

    /// Next page, or `None` when already on the last page
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn next_page(&mut self) -> Result<Option<SearchOutcome>> {
        let pagination = self.query.pagination();
        if !pagination.has_next() {
            return Ok(None);
        }
        self.go_to_page(pagination.current_page() + 1).await.map(Some)
    }

    /// Previous page, or `None` when already on the first page
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn previous_page(&mut self) -> Result<Option<SearchOutcome>> {
        let pagination = self.query.pagination();
        if !pagination.has_previous() {
            return Ok(None);
        }
        self.go_to_page(pagination.current_page() - 1).await.map(Some)
    }

    // ---- overlays ------------------------------------------------------

    /// Fetch and show a dataset in the detail overlay
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if the fetch fails; an error notice is
    /// shown and no overlay opens.
    pub async fn open_detail(&mut self, id: &str) -> Result<()> {
        let detail = match self.api.dataset(id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!(id, error = %e, "dataset fetch failed");
                self.renderer
                    .show_notice(&Notice::error(format!("Datensatz konnte nicht geladen werden: {e}")));
                return Err(e.into());
            }
        };

        self.close_overlay();
        self.url.set(UrlParam::Dataset, id);
        self.sync_location();

        let detail = self.detail.insert(detail);
        self.renderer.show_overlay(Overlay::Detail(detail));
        self.overlay = Some(OverlayKind::Detail);
        Ok(())
    }

    /// Close the detail overlay; returns whether it was open
    pub fn close_detail(&mut self) -> bool {
        if self.overlay != Some(OverlayKind::Detail) {
            return false;
        }
        self.hide(OverlayKind::Detail, UrlParam::Dataset);
        self.detail = None;
        true
    }

    /// Close whichever overlay is open
    pub fn close_overlay(&mut self) {
        match self.overlay {
            Some(OverlayKind::Detail) => {
                self.close_detail();
            }
            Some(OverlayKind::Analysis) => {
                self.hide(OverlayKind::Analysis, UrlParam::Concept);
                self.analysis = None;
            }
            None => {}
        }
    }

    fn hide(&mut self, kind: OverlayKind, param: UrlParam) {
        self.renderer.hide_overlay(kind);
        self.overlay = None;
        self.url.remove(param);
        self.sync_location();
    }

    // ---- combination ---------------------------------------------------

    /// Request a combination analysis for the selected records
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SelectionTooSmall` without sending a request
    /// when fewer than two records are selected, or `SessionError::Api` if
    /// the request fails.
    pub async fn analyze_selection(&mut self) -> Result<()> {
        let actual = self.selection.count();
        if actual < MIN_COMBINE_SELECTION {
            self.renderer.show_notice(&Notice::blocking(format!(
                "Bitte mindestens {MIN_COMBINE_SELECTION} Datensätze für die Analyse auswählen."
            )));
            return Err(SessionError::SelectionTooSmall {
                required: MIN_COMBINE_SELECTION,
                actual,
            });
        }

        let target = CombineTarget::Ids(self.selection.ids().to_vec());
        let response = self.fetch_combination(&target).await?;
        self.present_analysis(response, None);
        Ok(())
    }

    /// Request and show the analysis of a concept
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if the request fails.
    pub async fn open_concept_by_id(&mut self, concept: &str) -> Result<()> {
        let target = CombineTarget::Concept(concept.to_string());
        let response = self.fetch_combination(&target).await?;
        self.present_analysis(response, Some(concept.to_string()));
        Ok(())
    }

    /// Show an analysis that was already fetched
    pub fn open_analysis(&mut self, response: CombineResponse) {
        let concept = response.concept.clone();
        self.present_analysis(response, concept);
    }

    async fn fetch_combination(&mut self, target: &CombineTarget) -> Result<CombineResponse> {
        self.api.combine(target).await.map_err(|e| {
            warn!(?target, error = %e, "combination request failed");
            self.renderer
                .show_notice(&Notice::error(format!("Analyse fehlgeschlagen: {e}")));
            e.into()
        })
    }

    fn present_analysis(&mut self, response: CombineResponse, concept: Option<String>) {
        self.close_overlay();

        if let Some(concept) = &concept {
            self.url.set(UrlParam::Concept, concept);
            self.sync_location();
        }

        let view = self.analysis.insert(AnalysisView::from_response(response));
        self.renderer.show_overlay(Overlay::Analysis(view));
        self.overlay = Some(OverlayKind::Analysis);
    }

    /// Copy the prompt of the open analysis
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingToCopy` if no analysis with a prompt is
    /// open, or `SessionError::Ui` if the clipboard fails.
    pub fn copy_combination_prompt(&mut self) -> Result<()> {
        let prompt = self
            .analysis
            .as_ref()
            .filter(|_| self.overlay == Some(OverlayKind::Analysis))
            .and_then(|view| view.prompt.clone());

        let Some(prompt) = prompt else {
            self.renderer
                .show_notice(&Notice::info("Für diese Analyse ist kein Prompt verfügbar."));
            return Err(SessionError::NothingToCopy("combination prompt".into()));
        };
        self.copy_text(&prompt, "Prompt in die Zwischenablage kopiert.")
    }

    /// Fetch the LLM prompt for the selection and copy it
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSelection` without a request when nothing
    /// is selected, `SessionError::Api` if the request fails, or
    /// `SessionError::Ui` if the clipboard fails.
    pub async fn copy_selection_prompt(&mut self) -> Result<()> {
        if self.selection.count() == 0 {
            self.renderer
                .show_notice(&Notice::blocking("Bitte mindestens einen Datensatz auswählen."));
            return Err(SessionError::NoSelection);
        }

        let ids = self.selection.ids().to_vec();
        let response = match self.api.prompt(&ids).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "prompt request failed");
                self.renderer
                    .show_notice(&Notice::error(format!("Prompt konnte nicht erstellt werden: {e}")));
                return Err(e.into());
            }
        };
        self.copy_text(&response.prompt, "Prompt in die Zwischenablage kopiert.")
    }

    /// Copy a shareable link to the current view and return it
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ui` if the clipboard fails.
    pub fn copy_share_link(&mut self) -> Result<String> {
        let link = self.url.share_link(&self.share_base_url);
        self.copy_text(&link, "Link in die Zwischenablage kopiert.")?;
        Ok(link)
    }

    fn copy_text(&mut self, text: &str, success: &str) -> Result<()> {
        match self.clipboard.copy(text) {
            Ok(()) => {
                self.renderer.show_notice(&Notice::success(success));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                self.renderer
                    .show_notice(&Notice::error(format!("Kopieren fehlgeschlagen: {e}")));
                Err(e.into())
            }
        }
    }

    // ---- favorites -----------------------------------------------------

    /// Flip the favorite state of `id`, returning the new state
    ///
    /// The store write completes before the counter is updated.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if persisting fails; nothing changes.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let favorite = match self.favorites.toggle_favorite(id) {
            Ok(favorite) => favorite,
            Err(e) => {
                warn!(id, error = %e, "favorite not saved");
                self.renderer
                    .show_notice(&Notice::error("Favorit konnte nicht gespeichert werden."));
                return Err(e.into());
            }
        };

        self.renderer.show_favorites_count(self.favorites.len());
        self.renderer.show_favorite_marker(id, favorite);

        if !favorite {
            if let ListView::Favorites(records) = &mut self.view {
                let before = records.len();
                records.retain(|r| r.id != id);
                if records.len() < before {
                    self.selection.invalidate_anchor();
                }
                self.render_favorites();
            }
        }
        Ok(favorite)
    }

    /// Show the favorites list, fetching every favorite concurrently
    ///
    /// Favorites that fail to load are skipped. Returns how many were
    /// shown.
    pub async fn show_favorites(&mut self) -> usize {
        self.close_overlay();
        self.selection.invalidate_anchor();

        let ids = self.favorites.list_all();
        if ids.is_empty() {
            self.view = ListView::Favorites(Vec::new());
            self.render_favorites();
            return 0;
        }

        let api = Arc::clone(&self.api);
        let fetched = join_all(ids.iter().map(|id| api.dataset(id))).await;

        let records: Vec<Record> = ids
            .iter()
            .zip(fetched)
            .filter_map(|(id, result)| match result {
                Ok(detail) => Some(detail.into_record()),
                Err(e) => {
                    warn!(id = %id, error = %e, "skipping favorite that failed to load");
                    None
                }
            })
            .collect();

        let shown = records.len();
        self.view = ListView::Favorites(records);
        self.render_favorites();
        shown
    }

    fn render_favorites(&mut self) {
        let count = self.visible_records().len();
        let noun = if count == 1 { "Favorit" } else { "Favoriten" };
        self.renderer.show_caption(&format!("{count} {noun}"));
        self.renderer.show_pagination(&[]);
        self.render_list();
    }

    // ---- highlights and topics -----------------------------------------

    /// Load carousel highlights; either source may fail independently
    ///
    /// Returns the number of highlights shown.
    pub async fn load_highlights(&mut self) -> usize {
        let api = Arc::clone(&self.api);
        let (gems, concepts) = future::join(api.gems(self.highlight_limits.gems), api.concepts()).await;

        let gems = gems.map(|r| r.gems).unwrap_or_else(|e| {
            warn!(error = %e, "gems unavailable");
            Vec::new()
        });
        let concepts = concepts.map(|r| r.concepts).unwrap_or_else(|e| {
            warn!(error = %e, "concepts unavailable");
            Vec::new()
        });

        self.highlights = build_highlights(
            &concepts,
            &gems,
            self.highlight_limits.concepts,
            self.highlight_limits.gems,
        );
        if !self.highlights.is_empty() {
            self.renderer.show_highlights(&self.highlights, 0);
        }
        self.highlights.len()
    }

    /// Open whatever the highlight at `index` points to
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSuchHighlight` for an unknown index, or the
    /// error of the opened overlay.
    pub async fn activate_highlight(&mut self, index: usize) -> Result<()> {
        let highlight = self
            .highlights
            .get(index)
            .ok_or(SessionError::NoSuchHighlight(index))?;
        let (kind, id) = (highlight.kind, highlight.id.clone());

        match kind {
            HighlightKind::Concept => self.open_concept_by_id(&id).await,
            HighlightKind::Dataset => self.open_detail(&id).await,
        }
    }

    /// Load the topic filter options
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if the request fails; search stays usable.
    pub async fn load_topics(&mut self) -> Result<usize> {
        match self.api.topics().await {
            Ok(response) => {
                self.topics = response.topics;
                self.renderer.show_topics(&self.topics);
                Ok(self.topics.len())
            }
            Err(e) => {
                warn!(error = %e, "topics unavailable");
                self.renderer
                    .show_notice(&Notice::warning("Themen konnten nicht geladen werden."));
                Err(e.into())
            }
        }
    }

    // ---- keyboard and selection ----------------------------------------

    /// Handle a key press and return the action taken
    pub fn handle_key(&mut self, key: Key, focus: Focus) -> KeyAction {
        let action = resolve_key(key, focus);
        match action {
            KeyAction::CloseDetail => {
                self.close_detail();
            }
            KeyAction::FocusSearch => self.renderer.focus_search(),
            KeyAction::None => {}
        }
        action
    }

    /// Click on the card at `index` of the visible list
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSuchResult` if `index` is outside the list.
    pub fn click_result(&mut self, index: usize, range_modifier: bool) -> Result<()> {
        let records = match &self.view {
            ListView::Search => self.query.results(),
            ListView::Favorites(records) => records.as_slice(),
        };
        if !self.selection.record_click(index, range_modifier, records) {
            return Err(SessionError::NoSuchResult(index));
        }
        self.renderer.show_selection(self.selection.ids());
        Ok(())
    }

    /// Toggle `id` in the selection, returning whether it is now selected
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        let selected = self.selection.toggle(id);
        self.renderer.show_selection(self.selection.ids());
        selected
    }

    /// Add every id in `ids` to the selection without toggling
    ///
    /// Ids already selected, and repeats within `ids`, are kept once.
    /// Returns how many ids are selected afterwards.
    pub fn select_ids<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        for id in ids {
            self.selection.insert(id);
        }
        self.renderer.show_selection(self.selection.ids());
        self.selection.count()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.renderer.show_selection(self.selection.ids());
    }

    // ---- rendering helpers ---------------------------------------------

    fn render_list(&mut self) {
        let records = match &self.view {
            ListView::Search => self.query.results(),
            ListView::Favorites(records) => records.as_slice(),
        };
        let cards: Vec<ResultCard<'_>> = records
            .iter()
            .map(|record| ResultCard {
                record,
                favorite: self.favorites.is_favorite(&record.id),
                selected: self.selection.is_selected(&record.id),
            })
            .collect();

        self.renderer.show_results(&cards);
        if cards.is_empty() {
            let message = match self.view {
                ListView::Search => EMPTY_RESULTS,
                ListView::Favorites(_) => EMPTY_FAVORITES,
            };
            self.renderer.show_empty(message);
        }
    }

    fn sync_location(&mut self) {
        let location = self.url.location();
        self.renderer.replace_location(&location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Topic;
    use crate::session::PageButton;
    use crate::store::{FAVORITES_KEY, MemoryStore};
    use crate::testing::{
        ApiCall, MockCatalog, combine_response, concept, detail, gem, record, records,
    };
    use crate::ui::MessageLevel;
    use crate::ui::mock::{MemoryClipboard, RecordingRenderer, RenderEvent};

    struct Harness {
        session: Session,
        api: Arc<MockCatalog>,
        renderer: RecordingRenderer,
        clipboard: MemoryClipboard,
        store: MemoryStore,
    }

    fn harness(api: MockCatalog) -> Harness {
        harness_with_store(api, MemoryStore::new())
    }

    fn harness_with_store(api: MockCatalog, store: MemoryStore) -> Harness {
        let api = Arc::new(api);
        let renderer = RecordingRenderer::new();
        let clipboard = MemoryClipboard::new();
        let session = Session::builder()
            .api(api.clone())
            .renderer(Box::new(renderer.clone()))
            .clipboard(Box::new(clipboard.clone()))
            .store(Box::new(store.clone()))
            .page_size(20)
            .share_base_url("https://inspire.example.at")
            .build()
            .unwrap();

        Harness {
            session,
            api,
            renderer,
            clipboard,
            store,
        }
    }

    fn smart_response() -> SmartSearchResponse {
        SmartSearchResponse {
            query: "wald".into(),
            matched_concepts: vec![concept("wald", 3)],
            combinable_groups: Vec::new(),
            total: 1,
        }
    }

    #[test]
    fn test_build_requires_api() {
        let result = Session::builder()
            .renderer(Box::new(RecordingRenderer::new()))
            .clipboard(Box::new(MemoryClipboard::new()))
            .store(Box::new(MemoryStore::new()))
            .build();
        assert!(matches!(result, Err(SessionError::BuildError(_))));
    }

    #[tokio::test]
    async fn test_search_renders_and_syncs_query() {
        let mut h = harness(MockCatalog::new().with_search(42, records(20)).with_smart(smart_response()));

        let outcome = h.session.submit_query("wald").await.unwrap();

        assert_eq!(outcome, SearchOutcome::Applied { total: 42 });
        assert_eq!(h.session.query().total(), 42);
        assert_eq!(h.session.visible_records().len(), 20);
        assert!(h.renderer.any(|e| *e == RenderEvent::Caption("42 Ergebnisse für \"wald\"".into())));
        assert!(h.renderer.any(|e| matches!(e, RenderEvent::SmartResults(Some(_)))));
        assert_eq!(h.renderer.last_location().as_deref(), Some("/?q=wald"));
        assert_eq!(h.api.count(|c| matches!(c, ApiCall::SmartSearch(q) if q == "wald")), 1);
    }

    #[tokio::test]
    async fn test_empty_query_skips_smart_search_and_hides_panel() {
        let mut h = harness(MockCatalog::new().with_search(3, records(3)));

        h.session.search().await.unwrap();

        assert_eq!(h.api.count(|c| matches!(c, ApiCall::SmartSearch(_))), 0);
        assert!(h.renderer.any(|e| *e == RenderEvent::SmartResults(None)));
        assert_eq!(h.renderer.last_location(), None);
    }

    #[tokio::test]
    async fn test_smart_search_failure_does_not_fail_search() {
        let mut h = harness(MockCatalog::new().with_search(1, records(1)));

        let outcome = h.session.submit_query("wald").await.unwrap();

        assert_eq!(outcome, SearchOutcome::Applied { total: 1 });
        assert!(h.renderer.any(|e| *e == RenderEvent::SmartResults(None)));
    }

    #[tokio::test]
    async fn test_failed_search_keeps_results_and_is_retryable() {
        let mut h = harness(MockCatalog::new().with_search(2, records(2)));
        h.session.search().await.unwrap();

        h.api.fail_search();
        let err = h.session.search().await.unwrap_err();
        assert!(matches!(err, SessionError::Api(_)));
        assert!(h.renderer.any(|e| matches!(e, RenderEvent::SearchFailed(_))));
        assert_eq!(h.session.visible_records().len(), 2);

        h.api.set_search(5, records(5));
        let outcome = h.session.search().await.unwrap();
        assert_eq!(outcome, SearchOutcome::Applied { total: 5 });
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut h = harness(MockCatalog::new());

        let first = h.session.begin_search();
        let second = h.session.begin_search();
        assert!(second.seq > first.seq);

        let fresh = SearchResponse { total: 2, results: records(2) };
        let slow = SearchResponse { total: 9, results: records(9) };

        assert_eq!(
            h.session.apply_search(&second, Ok(fresh)).unwrap(),
            SearchOutcome::Applied { total: 2 }
        );
        assert_eq!(h.session.apply_search(&first, Ok(slow)).unwrap(), SearchOutcome::Stale);
        assert_eq!(h.session.query().total(), 2);
    }

    #[tokio::test]
    async fn test_search_invalidates_selection_anchor() {
        let mut h = harness(MockCatalog::new().with_search(5, records(5)));
        h.session.search().await.unwrap();
        h.session.click_result(1, false).unwrap();
        assert_eq!(h.session.selection().last_clicked(), Some(1));

        h.session.search().await.unwrap();
        assert_eq!(h.session.selection().last_clicked(), None);

        h.session.click_result(4, true).unwrap();
        assert_eq!(h.session.selection().ids(), ["r1", "r4"]);
    }

    #[tokio::test]
    async fn test_filter_change_resets_offset() {
        let mut h = harness(MockCatalog::new().with_search(95, records(20)));
        h.session.go_to_page(3).await.unwrap();
        assert_eq!(h.session.query().offset(), 40);

        h.session.set_filter(FilterKind::Province, "Tirol").await.unwrap();

        let last = h.api.search_requests().pop().unwrap();
        assert_eq!(last.offset, 0);
        assert_eq!(last.filters, vec![(FilterKind::Province, "Tirol".to_string())]);

        h.session.clear_filters().await.unwrap();
        assert!(h.api.search_requests().pop().unwrap().filters.is_empty());
    }

    #[tokio::test]
    async fn test_run_query_replaces_whole_state() {
        let mut h = harness(MockCatalog::new().with_search(95, records(20)));
        h.session.set_filter(FilterKind::Topic, "Umwelt").await.unwrap();

        h.session
            .run_query("wald", &[(FilterKind::Service, "WFS")], 2)
            .await
            .unwrap();

        let last = h.api.search_requests().pop().unwrap();
        assert_eq!(last.query.as_deref(), Some("wald"));
        assert_eq!(last.filters, vec![(FilterKind::Service, "WFS".to_string())]);
        assert_eq!(last.offset, 20);
    }

    #[tokio::test]
    async fn test_go_to_last_page() {
        let mut h = harness(MockCatalog::new().with_search(95, records(20)));
        h.session.search().await.unwrap();

        h.session.go_to_page(5).await.unwrap();

        assert_eq!(h.session.query().offset(), 80);
        assert!(h.renderer.any(|e| *e == RenderEvent::ScrollToTop));
        assert!(h.renderer.any(|e| match e {
            RenderEvent::Pagination(buttons) => buttons.last() == Some(&PageButton::Next { target: None }),
            _ => false,
        }));
        assert_eq!(h.session.next_page().await.unwrap(), None);

        h.session.previous_page().await.unwrap();
        assert_eq!(h.session.query().offset(), 60);
    }

    #[tokio::test]
    async fn test_huge_page_number_is_tolerated() {
        let mut h = harness(MockCatalog::new().with_search(95, Vec::new()));

        h.session.go_to_page(usize::MAX).await.unwrap();

        assert_eq!(h.api.search_requests().pop().unwrap().offset, usize::MAX);
        assert_eq!(h.session.next_page().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_previous_page_disabled_on_first_page() {
        let mut h = harness(MockCatalog::new().with_search(95, records(20)));
        h.session.search().await.unwrap();

        assert_eq!(h.session.previous_page().await.unwrap(), None);
        assert_eq!(h.api.search_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_results_render_empty_state() {
        let mut h = harness(MockCatalog::new().with_search(0, Vec::new()));
        h.session.submit_query("nichts").await.unwrap();

        assert!(h.renderer.any(|e| *e == RenderEvent::Empty(EMPTY_RESULTS.into())));
        assert!(!h.renderer.any(|e| matches!(e, RenderEvent::SearchFailed(_))));
    }

    #[tokio::test]
    async fn test_detail_open_close_restores_url() {
        let mut h = harness(MockCatalog::new().with_search(1, records(1)).with_dataset(detail("D1")));
        h.session.restore("/?q=wald").await.unwrap();
        assert_eq!(h.session.location(), "/?q=wald");

        h.session.open_detail("D1").await.unwrap();
        assert_eq!(h.renderer.last_location().as_deref(), Some("/?q=wald&dataset=D1"));
        assert_eq!(h.session.open_overlay(), Some(OverlayKind::Detail));

        assert!(h.session.close_detail());
        assert_eq!(h.renderer.last_location().as_deref(), Some("/?q=wald"));
        assert_eq!(h.session.open_overlay(), None);
    }

    #[tokio::test]
    async fn test_detail_failure_shows_notice_and_opens_nothing() {
        let mut h = harness(MockCatalog::new());

        assert!(h.session.open_detail("missing").await.is_err());

        assert_eq!(h.session.open_overlay(), None);
        let notices = h.renderer.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, MessageLevel::Error);
        assert_eq!(h.session.location(), "/");
    }

    #[tokio::test]
    async fn test_only_one_overlay_at_a_time() {
        let mut h = harness(
            MockCatalog::new()
                .with_dataset(detail("D1"))
                .with_combine(combine_response(Some("wald"))),
        );

        h.session.open_detail("D1").await.unwrap();
        h.session.open_concept_by_id("wald").await.unwrap();

        assert_eq!(h.session.open_overlay(), Some(OverlayKind::Analysis));
        assert!(h.session.detail().is_none());
        assert!(h.renderer.any(|e| *e == RenderEvent::HideOverlay(OverlayKind::Detail)));
        assert_eq!(h.session.location(), "/?concept=wald");
    }

    #[tokio::test]
    async fn test_search_closes_overlays() {
        let mut h = harness(MockCatalog::new().with_search(1, records(1)).with_dataset(detail("D1")));
        h.session.open_detail("D1").await.unwrap();

        h.session.search().await.unwrap();

        assert_eq!(h.session.open_overlay(), None);
        assert_eq!(h.session.location(), "/");
    }

    #[tokio::test]
    async fn test_analyze_with_one_selected_sends_nothing() {
        let mut h = harness(MockCatalog::new().with_combine(combine_response(None)));
        h.session.toggle_selection("a");

        let err = h.session.analyze_selection().await.unwrap_err();

        assert!(matches!(err, SessionError::SelectionTooSmall { required: 2, actual: 1 }));
        assert!(h.api.calls().is_empty());
        let notices = h.renderer.notices();
        assert!(notices[0].blocking);
    }

    #[tokio::test]
    async fn test_analyze_selection_sends_ids_in_order() {
        let mut h = harness(MockCatalog::new().with_combine(combine_response(None)));
        h.session.toggle_selection("b");
        h.session.toggle_selection("a");

        h.session.analyze_selection().await.unwrap();

        assert_eq!(
            h.api.calls(),
            vec![ApiCall::Combine(CombineTarget::Ids(vec!["b".into(), "a".into()]))]
        );
        assert_eq!(h.session.open_overlay(), Some(OverlayKind::Analysis));
        assert_eq!(h.session.location(), "/");
        assert_eq!(h.session.analysis().unwrap().coverage_percent, 44);
    }

    #[tokio::test]
    async fn test_combination_failure_opens_nothing() {
        let mut h = harness(MockCatalog::new());
        assert!(h.session.open_concept_by_id("wald").await.is_err());
        assert_eq!(h.session.open_overlay(), None);
        assert_eq!(h.renderer.notices()[0].level, MessageLevel::Error);
    }

    #[test]
    fn test_open_analysis_uses_payload_concept() {
        let mut h = harness(MockCatalog::new());
        h.session.open_analysis(combine_response(Some("grundwasser")));

        assert_eq!(h.session.location(), "/?concept=grundwasser");
        assert!(h.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_copy_combination_prompt() {
        let mut h = harness(MockCatalog::new().with_combine(combine_response(Some("wald"))));
        h.session.open_concept_by_id("wald").await.unwrap();

        h.session.copy_combination_prompt().unwrap();

        assert_eq!(h.clipboard.contents().as_deref(), Some("Kombiniere die WFS-Dienste"));
    }

    #[test]
    fn test_copy_prompt_without_analysis() {
        let mut h = harness(MockCatalog::new());
        let err = h.session.copy_combination_prompt().unwrap_err();
        assert!(matches!(err, SessionError::NothingToCopy(_)));
        assert!(h.clipboard.contents().is_none());
    }

    #[tokio::test]
    async fn test_copy_selection_prompt() {
        let mut h = harness(MockCatalog::new().with_prompt("Nutze a und b"));
        assert!(matches!(
            h.session.copy_selection_prompt().await,
            Err(SessionError::NoSelection)
        ));

        h.session.toggle_selection("a");
        h.session.toggle_selection("b");
        h.session.copy_selection_prompt().await.unwrap();

        assert_eq!(h.clipboard.contents().as_deref(), Some("Nutze a und b"));
        assert_eq!(h.api.calls(), vec![ApiCall::Prompt(vec!["a".into(), "b".into()])]);
    }

    #[tokio::test]
    async fn test_copy_share_link() {
        let mut h = harness(MockCatalog::new().with_dataset(detail("D1")));
        h.session.open_detail("D1").await.unwrap();

        let link = h.session.copy_share_link().unwrap();

        assert_eq!(link, "https://inspire.example.at/?dataset=D1");
        assert_eq!(h.clipboard.contents(), Some(link));
    }

    #[test]
    fn test_toggle_favorite_persists_before_counter() {
        let mut h = harness(MockCatalog::new());

        assert!(h.session.toggle_favorite("D1").unwrap());

        assert_eq!(h.store.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["D1"]"#));
        assert_eq!(
            h.renderer.events(),
            vec![
                RenderEvent::FavoritesCount(1),
                RenderEvent::FavoriteMarker("D1".into(), true),
            ]
        );
    }

    #[tokio::test]
    async fn test_show_favorites_skips_failures() {
        let store = MemoryStore::with_entry(FAVORITES_KEY, r#"["a","missing","b"]"#);
        let mut h = harness_with_store(
            MockCatalog::new().with_dataset(detail("a")).with_dataset(detail("b")),
            store,
        );

        let shown = h.session.show_favorites().await;

        assert_eq!(shown, 2);
        assert_eq!(h.renderer.last_results(), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(h.api.count(|c| matches!(c, ApiCall::Dataset(_))), 3);
        assert!(h.renderer.any(|e| *e == RenderEvent::Caption("2 Favoriten".into())));
    }

    #[tokio::test]
    async fn test_empty_favorites_render_empty_state() {
        let mut h = harness(MockCatalog::new());

        assert_eq!(h.session.show_favorites().await, 0);

        assert!(h.api.calls().is_empty());
        assert!(h.renderer.any(|e| *e == RenderEvent::Empty(EMPTY_FAVORITES.into())));
    }

    #[tokio::test]
    async fn test_unfavorite_in_favorites_view_removes_card() {
        let store = MemoryStore::with_entry(FAVORITES_KEY, r#"["a","b"]"#);
        let mut h = harness_with_store(
            MockCatalog::new().with_dataset(detail("a")).with_dataset(detail("b")),
            store,
        );
        h.session.show_favorites().await;

        assert!(!h.session.toggle_favorite("a").unwrap());

        assert_eq!(h.renderer.last_results(), Some(vec!["b".to_string()]));
    }

    #[tokio::test]
    async fn test_unfavorite_in_favorites_view_drops_range_anchor() {
        let store = MemoryStore::with_entry(FAVORITES_KEY, r#"["a","b","c"]"#);
        let mut h = harness_with_store(
            MockCatalog::new()
                .with_dataset(detail("a"))
                .with_dataset(detail("b"))
                .with_dataset(detail("c")),
            store,
        );
        h.session.show_favorites().await;
        h.session.click_result(0, false).unwrap();
        assert_eq!(h.session.selection().last_clicked(), Some(0));

        assert!(!h.session.toggle_favorite("a").unwrap());
        assert_eq!(h.session.selection().last_clicked(), None);

        // index 1 is now "c"; without an anchor the click only toggles it
        h.session.click_result(1, true).unwrap();
        assert_eq!(h.session.selection().ids(), ["a", "c"]);
    }

    #[tokio::test]
    async fn test_restore_priority() {
        let api = MockCatalog::new()
            .with_search(1, records(1))
            .with_dataset(detail("D9"))
            .with_combine(combine_response(Some("wald")));
        let mut h = harness(api);

        h.session.restore("/?q=wald&concept=wald&dataset=D9").await.unwrap();

        assert_eq!(h.api.calls(), vec![ApiCall::Dataset("D9".into())]);
        assert_eq!(h.session.open_overlay(), Some(OverlayKind::Detail));
    }

    #[tokio::test]
    async fn test_restore_concept_over_query() {
        let mut h = harness(MockCatalog::new().with_combine(combine_response(Some("wald"))));

        h.session.restore("/?q=wald&concept=wald").await.unwrap();

        assert_eq!(
            h.api.calls(),
            vec![ApiCall::Combine(CombineTarget::Concept("wald".into()))]
        );
    }

    #[tokio::test]
    async fn test_restore_query_prefills_and_searches() {
        let mut h = harness(MockCatalog::new().with_search(1, records(1)));

        h.session.restore("/?q=wasser").await.unwrap();

        assert!(h.renderer.any(|e| *e == RenderEvent::FillSearch("wasser".into())));
        assert_eq!(h.api.search_requests()[0].query.as_deref(), Some("wasser"));
    }

    #[tokio::test]
    async fn test_restore_default_runs_unfiltered_search() {
        let mut h = harness(MockCatalog::new().with_search(0, Vec::new()));

        h.session.restore("/").await.unwrap();

        let requests = h.api.search_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, None);
        assert!(requests[0].filters.is_empty());
    }

    #[tokio::test]
    async fn test_load_highlights_tolerates_gem_failure() {
        let mut h = harness(MockCatalog::new().with_concepts(vec![concept("wald", 5), concept("luft", 1)]));

        let count = h.session.load_highlights().await;

        assert_eq!(count, 1);
        assert!(h.renderer.any(|e| *e == RenderEvent::Highlights(vec!["wald".into()], 0)));
        assert!(h.session.carousel().is_some());
    }

    #[tokio::test]
    async fn test_activate_highlight_opens_target() {
        let mut h = harness(
            MockCatalog::new()
                .with_concepts(vec![concept("wald", 5)])
                .with_gems(vec![gem("G1", Some("Tirol"))])
                .with_dataset(detail("G1"))
                .with_combine(combine_response(Some("wald"))),
        );
        h.session.load_highlights().await;

        h.session.activate_highlight(0).await.unwrap();
        assert_eq!(h.session.open_overlay(), Some(OverlayKind::Analysis));

        h.session.activate_highlight(1).await.unwrap();
        assert_eq!(h.session.open_overlay(), Some(OverlayKind::Detail));
        assert_eq!(h.session.location(), "/?dataset=G1");

        assert!(matches!(
            h.session.activate_highlight(7).await,
            Err(SessionError::NoSuchHighlight(7))
        ));
    }

    #[tokio::test]
    async fn test_load_topics() {
        let topics = vec![Topic {
            topic: "Umwelt".into(),
            count: 120,
        }];
        let mut h = harness(MockCatalog::new().with_topics(topics.clone()));

        assert_eq!(h.session.load_topics().await.unwrap(), 1);
        assert!(h.renderer.any(|e| *e == RenderEvent::Topics(topics.clone())));

        let mut failing = harness(MockCatalog::new());
        assert!(failing.session.load_topics().await.is_err());
        assert_eq!(failing.renderer.notices()[0].level, MessageLevel::Warning);
    }

    #[tokio::test]
    async fn test_keyboard_surface() {
        let mut h = harness(MockCatalog::new().with_dataset(detail("D1")));
        h.session.open_detail("D1").await.unwrap();

        assert_eq!(h.session.handle_key(Key::Slash, Focus::TextInput), KeyAction::None);
        assert_eq!(h.session.handle_key(Key::Slash, Focus::Elsewhere), KeyAction::FocusSearch);
        assert!(h.renderer.any(|e| *e == RenderEvent::FocusSearch));

        assert_eq!(h.session.handle_key(Key::Escape, Focus::Elsewhere), KeyAction::CloseDetail);
        assert_eq!(h.session.open_overlay(), None);
    }

    #[tokio::test]
    async fn test_selection_operations_render() {
        let mut h = harness(MockCatalog::new().with_search(3, vec![record("x"), record("y"), record("z")]));
        h.session.search().await.unwrap();
        h.renderer.clear();

        h.session.click_result(0, false).unwrap();
        h.session.click_result(2, true).unwrap();
        assert!(matches!(h.session.click_result(9, false), Err(SessionError::NoSuchResult(9))));
        h.session.clear_selection();

        assert_eq!(
            h.renderer.events(),
            vec![
                RenderEvent::Selection(vec!["x".into()]),
                RenderEvent::Selection(vec!["x".into(), "y".into(), "z".into()]),
                RenderEvent::Selection(Vec::new()),
            ]
        );
    }

    #[tokio::test]
    async fn test_select_ids_keeps_repeated_ids() {
        let mut h = harness(MockCatalog::new().with_combine(combine_response(None)));
        h.session.toggle_selection("b");

        assert_eq!(h.session.select_ids(["a", "a", "b"]), 2);
        assert_eq!(h.session.selection().ids(), ["b", "a"]);

        h.session.analyze_selection().await.unwrap();
        assert_eq!(
            h.api.calls(),
            vec![ApiCall::Combine(CombineTarget::Ids(vec!["b".into(), "a".into()]))]
        );
    }
}
