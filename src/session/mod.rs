//! Client-side state engine
//!
//! Everything that decides *what* the search page shows lives here:
//! query and pagination state, the multi-selection, URL synchronisation,
//! the highlight carousel and the combination analysis. Rendering,
//! persistence and network access are injected collaborators.

mod analysis;
mod carousel;
mod controller;
pub mod error;
mod highlights;
mod pagination;
mod query;
mod selection;
mod url_sync;

pub use analysis::{
    AnalysisView, FALLBACK_TITLE, MAX_COMMON_FIELDS, MAX_FIELD_MAPPINGS, PROVINCES,
    ProvinceCoverage, Truncated,
};
pub use carousel::{
    Carousel, CarouselHandle, CarouselScheduler, CarouselTiming, HighlightSink, Rotation,
};
pub use controller::{
    HighlightLimits, MIN_COMBINE_SELECTION, PendingSearch, SearchOutcome, Session,
    SessionBuilder,
};
pub use error::{Result, SessionError};
pub use highlights::{Highlight, HighlightKind, MIN_CONCEPT_WFS, build_highlights};
pub use pagination::{MAX_NUMBERED_PAGES, PageButton, Pagination};
pub use query::{FilterKind, Filters, QueryState, SearchRequest, result_caption};
pub use selection::SelectionModel;
pub use url_sync::{InitialView, UrlParam, UrlSync};
