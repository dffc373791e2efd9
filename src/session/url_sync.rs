//! Shareable-URL synchronisation
//!
//! Mirrors the search text and the open overlay into the query string of
//! the address bar. Writes always replace the current location, never
//! push a new history entry. At startup the location is read once to
//! decide the initial view, with priority `dataset` > `concept` > `q`.

use tracing::warn;

/// Query parameters the session owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlParam {
    /// Free-text search, `q=`
    Query,
    /// Open detail overlay, `dataset=`
    Dataset,
    /// Open concept analysis, `concept=`
    Concept,
}

impl UrlParam {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query => "q",
            Self::Dataset => "dataset",
            Self::Concept => "concept",
        }
    }
}

/// What the location asks to show on first load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialView {
    Dataset(String),
    Concept(String),
    Search(String),
    Default,
}

/// Path plus ordered query parameters of the current location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSync {
    path: String,
    params: Vec<(String, String)>,
}

impl Default for UrlSync {
    fn default() -> Self {
        Self::parse("/")
    }
}

impl UrlSync {
    /// Parse a location such as `/?q=wald&dataset=D1`
    ///
    /// Any fragment is dropped. An unparsable query string is logged and
    /// treated as empty.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let location = location.split('#').next().unwrap_or_default();
        let (path, query) = location.split_once('?').unwrap_or((location, ""));

        let params = serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_else(|e| {
            warn!(location, error = %e, "ignoring malformed query string");
            Vec::new()
        });

        Self {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            params,
        }
    }

    /// Value of `param`, ignoring empty values
    #[must_use]
    pub fn get(&self, param: UrlParam) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == param.name())
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Set `param`, keeping its position if already present
    pub fn set(&mut self, param: UrlParam, value: &str) {
        if let Some(entry) = self.params.iter_mut().find(|(k, _)| k == param.name()) {
            entry.1 = value.to_string();
        } else {
            self.params.push((param.name().to_string(), value.to_string()));
        }
    }

    /// Remove `param`, leaving every other parameter intact
    pub fn remove(&mut self, param: UrlParam) {
        self.params.retain(|(k, _)| k != param.name());
    }

    /// Location to put in the address bar; the bare path when no
    /// parameters remain
    #[must_use]
    pub fn location(&self) -> String {
        match serde_urlencoded::to_string(&self.params) {
            Ok(query) if !query.is_empty() => format!("{}?{query}", self.path),
            _ => self.path.clone(),
        }
    }

    /// Absolute link for sharing, rooted at `base_url`
    #[must_use]
    pub fn share_link(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.location())
    }

    /// Initial view requested by the location
    #[must_use]
    pub fn initial_view(&self) -> InitialView {
        if let Some(id) = self.get(UrlParam::Dataset) {
            InitialView::Dataset(id.to_string())
        } else if let Some(id) = self.get(UrlParam::Concept) {
            InitialView::Concept(id.to_string())
        } else if let Some(q) = self.get(UrlParam::Query) {
            InitialView::Search(q.to_string())
        } else {
            InitialView::Default
        }
    }
}
