//! Testing utilities for inspire-finder
//!
//! Provides an in-memory [`MockCatalog`] that records every call, record
//! and payload builders, and a recording carousel sink.
//!
//! Only available when compiled with `cfg(test)`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{
    Analysis, ApiError, CatalogApi, CombineResponse, CombineTarget, Concept, ConceptsResponse,
    DatasetDetail, Gem, GemsResponse, PromptResponse, Record, Result, SearchResponse, Service,
    SmartSearchResponse, Topic, TopicsResponse,
};
use crate::session::{Highlight, HighlightSink, SearchRequest};

/// A call observed by [`MockCatalog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Search(SearchRequest),
    Dataset(String),
    Gems(usize),
    Concepts,
    SmartSearch(String),
    Combine(CombineTarget),
    Prompt(Vec<String>),
    Topics,
}

#[derive(Default)]
struct Responses {
    search: Option<SearchResponse>,
    datasets: HashMap<String, DatasetDetail>,
    gems: Option<Vec<Gem>>,
    concepts: Option<Vec<Concept>>,
    smart: Option<SmartSearchResponse>,
    combine: Option<CombineResponse>,
    prompt: Option<String>,
    topics: Option<Vec<Topic>>,
}

/// Catalog fake with canned responses
///
/// Endpoints without a configured response fail with HTTP 503; unknown
/// dataset ids fail with HTTP 404.
#[derive(Default)]
pub struct MockCatalog {
    responses: Mutex<Responses>,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(self, total: usize, results: Vec<Record>) -> Self {
        self.set_search(total, results);
        self
    }

    #[must_use]
    pub fn with_dataset(self, detail: DatasetDetail) -> Self {
        self.responses.lock().unwrap().datasets.insert(detail.id.clone(), detail);
        self
    }

    #[must_use]
    pub fn with_gems(self, gems: Vec<Gem>) -> Self {
        self.responses.lock().unwrap().gems = Some(gems);
        self
    }

    #[must_use]
    pub fn with_concepts(self, concepts: Vec<Concept>) -> Self {
        self.responses.lock().unwrap().concepts = Some(concepts);
        self
    }

    #[must_use]
    pub fn with_smart(self, smart: SmartSearchResponse) -> Self {
        self.responses.lock().unwrap().smart = Some(smart);
        self
    }

    #[must_use]
    pub fn with_combine(self, response: CombineResponse) -> Self {
        self.responses.lock().unwrap().combine = Some(response);
        self
    }

    #[must_use]
    pub fn with_prompt(self, prompt: &str) -> Self {
        self.responses.lock().unwrap().prompt = Some(prompt.to_string());
        self
    }

    #[must_use]
    pub fn with_topics(self, topics: Vec<Topic>) -> Self {
        self.responses.lock().unwrap().topics = Some(topics);
        self
    }

    /// Replace the search response mid-test
    pub fn set_search(&self, total: usize, results: Vec<Record>) {
        self.responses.lock().unwrap().search = Some(SearchResponse { total, results });
    }

    /// Make subsequent searches fail
    pub fn fail_search(&self) {
        self.responses.lock().unwrap().search = None;
    }

    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls matching `predicate`
    pub fn count(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(*c)).count()
    }

    /// Requests sent to `/api/search`, oldest first
    #[must_use]
    pub fn search_requests(&self) -> Vec<SearchRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                ApiCall::Search(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unavailable(endpoint: &str) -> ApiError {
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status: 503,
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.record(ApiCall::Search(request.clone()));
        self.responses
            .lock()
            .unwrap()
            .search
            .clone()
            .ok_or_else(|| unavailable("/api/search"))
    }

    async fn dataset(&self, id: &str) -> Result<DatasetDetail> {
        self.record(ApiCall::Dataset(id.to_string()));
        self.responses
            .lock()
            .unwrap()
            .datasets
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                endpoint: "/api/dataset".into(),
                status: 404,
            })
    }

    async fn gems(&self, limit: usize) -> Result<GemsResponse> {
        self.record(ApiCall::Gems(limit));
        self.responses
            .lock()
            .unwrap()
            .gems
            .clone()
            .map(|gems| GemsResponse { gems })
            .ok_or_else(|| unavailable("/api/gems"))
    }

    async fn concepts(&self) -> Result<ConceptsResponse> {
        self.record(ApiCall::Concepts);
        self.responses
            .lock()
            .unwrap()
            .concepts
            .clone()
            .map(|concepts| ConceptsResponse { concepts })
            .ok_or_else(|| unavailable("/api/concepts"))
    }

    async fn smart_search(&self, query: &str) -> Result<SmartSearchResponse> {
        self.record(ApiCall::SmartSearch(query.to_string()));
        self.responses
            .lock()
            .unwrap()
            .smart
            .clone()
            .ok_or_else(|| unavailable("/api/smart-search"))
    }

    async fn combine(&self, target: &CombineTarget) -> Result<CombineResponse> {
        self.record(ApiCall::Combine(target.clone()));
        self.responses
            .lock()
            .unwrap()
            .combine
            .clone()
            .ok_or_else(|| unavailable("/api/combine"))
    }

    async fn prompt(&self, ids: &[String]) -> Result<PromptResponse> {
        self.record(ApiCall::Prompt(ids.to_vec()));
        self.responses
            .lock()
            .unwrap()
            .prompt
            .clone()
            .map(|prompt| PromptResponse { prompt })
            .ok_or_else(|| unavailable("/api/prompt"))
    }

    async fn topics(&self) -> Result<TopicsResponse> {
        self.record(ApiCall::Topics);
        self.responses
            .lock()
            .unwrap()
            .topics
            .clone()
            .map(|topics| TopicsResponse { topics })
            .ok_or_else(|| unavailable("/api/topics"))
    }
}

/// A minimal record with the given id
#[must_use]
pub fn record(id: &str) -> Record {
    Record {
        id: id.to_string(),
        title: format!("Datensatz {id}"),
        summary: String::new(),
        kind: Some("dataset".into()),
        province: Some("Tirol".into()),
        org: None,
        year: None,
        themes: Vec::new(),
        topics: Vec::new(),
        services: vec![Service {
            kind: "WFS".into(),
            url: format!("https://example.at/wfs/{id}"),
            protocol: None,
        }],
        gem_score: 0.0,
        is_open_data: true,
    }
}

/// `n` records with ids `r0` .. `r{n-1}`
#[must_use]
pub fn records(n: usize) -> Vec<Record> {
    (0..n).map(|i| record(&format!("r{i}"))).collect()
}

/// A detail payload for `id`
#[must_use]
pub fn detail(id: &str) -> DatasetDetail {
    DatasetDetail {
        id: id.to_string(),
        uuid: None,
        title: format!("Datensatz {id}"),
        summary: Some("Beschreibung".into()),
        kind: Some("dataset".into()),
        province: Some("Wien".into()),
        year: Some(2023),
        themes: vec!["Hydrografie".into()],
        topics: Vec::new(),
        keywords: vec!["wasser".into()],
        services: Vec::new(),
        formats: Vec::new(),
        gem_score: 8.5,
        is_open_data: true,
        org: None,
        contact: None,
        create_date: None,
        update_date: Some("2024-03-01".into()),
        bbox: None,
        inspire_url: Some(format!("https://inspire.example.at/{id}")),
    }
}

/// A concept spanning three provinces with `wfs_count` WFS endpoints
#[must_use]
pub fn concept(id: &str, wfs_count: u32) -> Concept {
    Concept {
        id: id.to_string(),
        name_de: format!("Konzept {id}"),
        name_en: None,
        datasets: 12,
        provinces: 3,
        wfs_count,
    }
}

#[must_use]
pub fn gem(id: &str, province: Option<&str>) -> Gem {
    Gem {
        id: id.to_string(),
        title: format!("Juwel {id}"),
        province: province.map(String::from),
        score: 9.0,
    }
}

/// A combinable analysis with a prompt, optionally for a concept
#[must_use]
pub fn combine_response(concept: Option<&str>) -> CombineResponse {
    CombineResponse {
        concept: concept.map(String::from),
        name_de: None,
        analysis: Analysis {
            coverage_pct: 44.4,
            provinces_covered: vec!["Wien".into(), "Tirol".into(), "Salzburg".into(), "Kärnten".into()],
            missing_provinces: Vec::new(),
            datasets_with_wfs: 4,
            total_datasets: 5,
            combinable: true,
            common_fields: vec!["name".into(), "geometry".into(), "id".into()],
            all_fields: Vec::new(),
            field_mappings: Vec::new(),
        },
        wfs_services: Vec::new(),
        combination_prompt: Some("Kombiniere die WFS-Dienste".into()),
    }
}

/// Carousel sink call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    Deactivate(usize),
    Activate(usize),
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl HighlightSink for RecordingSink {
    fn deactivate(&self, index: usize, _highlight: &Highlight) {
        self.events.lock().unwrap().push(SinkEvent::Deactivate(index));
    }

    fn activate(&self, index: usize, _highlight: &Highlight) {
        self.events.lock().unwrap().push(SinkEvent::Activate(index));
    }
}
