//! Query state: free text, filters and pagination
//!
//! [`QueryState`] is the single source of truth for what the next search
//! request contains. It is mutated only through the session's named
//! operations (submit, filter change, page navigation) and by applying a
//! successful search response.

use crate::api::Record;

use super::pagination::Pagination;

/// The four facet filters accepted by `/api/search`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Record type (dataset, service, series, ...)
    Type,
    Province,
    /// Service type (WFS, WMS, OGC-API, ...)
    Service,
    Topic,
}

impl FilterKind {
    /// All filters in request parameter order
    pub const ALL: [Self; 4] = [Self::Type, Self::Province, Self::Service, Self::Topic];

    /// Query parameter name used by the search endpoint
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Province => "province",
            Self::Service => "service",
            Self::Topic => "topic",
        }
    }
}

/// Facet filter values; `None` means no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    kind: Option<String>,
    province: Option<String>,
    service: Option<String>,
    topic: Option<String>,
}

impl Filters {
    /// Set a filter; empty or whitespace-only values clear it
    pub fn set(&mut self, filter: FilterKind, value: &str) {
        let value = value.trim();
        *self.slot(filter) = (!value.is_empty()).then(|| value.to_string());
    }

    /// Current value of a filter
    #[must_use]
    pub fn get(&self, filter: FilterKind) -> Option<&str> {
        match filter {
            FilterKind::Type => self.kind.as_deref(),
            FilterKind::Province => self.province.as_deref(),
            FilterKind::Service => self.service.as_deref(),
            FilterKind::Topic => self.topic.as_deref(),
        }
    }

    /// Remove every constraint
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        FilterKind::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// Filters that carry a value, in request parameter order
    #[must_use]
    pub fn active(&self) -> Vec<(FilterKind, String)> {
        FilterKind::ALL
            .iter()
            .filter_map(|f| self.get(*f).map(|v| (*f, v.to_string())))
            .collect()
    }

    fn slot(&mut self, filter: FilterKind) -> &mut Option<String> {
        match filter {
            FilterKind::Type => &mut self.kind,
            FilterKind::Province => &mut self.province,
            FilterKind::Service => &mut self.service,
            FilterKind::Topic => &mut self.topic,
        }
    }
}

/// A fully resolved `/api/search` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free text, `None` when empty
    pub query: Option<String>,
    /// Only filters that carry a value
    pub filters: Vec<(FilterKind, String)>,
    pub limit: usize,
    pub offset: usize,
}

impl SearchRequest {
    /// Encode as query parameters: `q`, filters, `limit`, `offset`
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 3);
        if let Some(q) = &self.query {
            params.push(("q", q.clone()));
        }
        for (filter, value) in &self.filters {
            params.push((filter.param(), value.clone()));
        }
        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        params
    }
}

/// Canonical mutable record of the current search
#[derive(Debug, Clone)]
pub struct QueryState {
    /// Free text, may be empty
    pub query: String,
    pub filters: Filters,
    offset: usize,
    limit: usize,
    total: usize,
    results: Vec<Record>,
}

impl QueryState {
    /// Create an empty state with the given page size (at least 1)
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            query: String::new(),
            filters: Filters::default(),
            offset: 0,
            limit: limit.max(1),
            total: 0,
            results: Vec::new(),
        }
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Last server-reported result count
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Records of the current page
    #[must_use]
    pub fn results(&self) -> &[Record] {
        &self.results
    }

    /// Restart pagination at the first page
    pub const fn reset_offset(&mut self) {
        self.offset = 0;
    }

    /// Move to 1-based `page`; page 0 is treated as page 1
    ///
    /// Out-of-range pages are accepted; the server decides what they hold.
    pub const fn set_page(&mut self, page: usize) {
        self.offset = page.saturating_sub(1).saturating_mul(self.limit);
    }

    /// Build the request for the current state
    #[must_use]
    pub fn request(&self) -> SearchRequest {
        let query = self.query.trim();
        SearchRequest {
            query: (!query.is_empty()).then(|| query.to_string()),
            filters: self.filters.active(),
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Replace results and total together
    pub fn replace_results(&mut self, results: Vec<Record>, total: usize) {
        self.results = results;
        self.total = total;
    }

    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        Pagination::new(self.total, self.limit, self.offset)
    }

    /// Human-readable result count, quoting the query when present
    #[must_use]
    pub fn caption(&self) -> String {
        result_caption(self.total, self.query.trim())
    }
}

/// `"1 Ergebnis"`, `"42 Ergebnisse"`, `"42 Ergebnisse für \"wald\""`
#[must_use]
pub fn result_caption(total: usize, query: &str) -> String {
    let noun = if total == 1 { "Ergebnis" } else { "Ergebnisse" };
    if query.is_empty() {
        format!("{total} {noun}")
    } else {
        format!("{total} {noun} für \"{query}\"")
    }
}
