//! Wire types for the catalog read API
//!
//! These mirror the JSON payloads returned by the catalog server. Every
//! field that the server may leave out carries `#[serde(default)]` so that
//! partial payloads still decode. The session treats all of these as
//! read-only data keyed by `id`.

use serde::{Deserialize, Serialize};

/// A service endpoint attached to a record (WFS, WMS, OGC-API, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub protocol: Option<String>,
}

/// One catalog entry as returned by `/api/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub summary: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub gem_score: f64,
    #[serde(default)]
    pub is_open_data: bool,
}

impl Record {
    /// Whether the record exposes a WFS endpoint
    #[must_use]
    pub fn has_wfs(&self) -> bool {
        self.services.iter().any(|s| s.kind == "WFS")
    }
}

/// Response of `/api/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: usize,
    #[serde(default)]
    pub results: Vec<Record>,
}

/// Full record as returned by `/api/dataset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDetail {
    pub id: String,
    #[serde(default)]
    pub uuid: Option<String>,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub summary: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub formats: Vec<String>,
    #[serde(default)]
    pub gem_score: f64,
    #[serde(default)]
    pub is_open_data: bool,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub update_date: Option<String>,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
    #[serde(default)]
    pub inspire_url: Option<String>,
}

impl DatasetDetail {
    /// Reduce a detail payload to the list-card shape
    ///
    /// Used by the favorites view, which fetches each favorite through the
    /// detail endpoint but renders it with the regular result list.
    #[must_use]
    pub fn into_record(self) -> Record {
        Record {
            id: self.id,
            title: self.title,
            summary: self.summary.unwrap_or_default(),
            kind: self.kind,
            province: self.province,
            org: self.org,
            year: self.year,
            themes: self.themes,
            topics: self.topics,
            services: self.services,
            gem_score: self.gem_score,
            is_open_data: self.is_open_data,
        }
    }
}

/// A curated high-score dataset for the highlight carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GemsResponse {
    #[serde(default)]
    pub gems: Vec<Gem>,
}

/// A thematic grouping of records across provinces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,
    pub name_de: String,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub datasets: u32,
    #[serde(default)]
    pub provinces: u32,
    #[serde(default)]
    pub wfs_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptsResponse {
    #[serde(default)]
    pub concepts: Vec<Concept>,
}

/// A concept whose datasets span several provinces with WFS coverage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinableGroup {
    pub concept: String,
    pub name: String,
    #[serde(default)]
    pub provinces: Vec<String>,
    #[serde(default)]
    pub dataset_count: u32,
    #[serde(default)]
    pub wfs_count: u32,
    #[serde(default)]
    pub datasets: Vec<String>,
}

/// Response of `/api/smart-search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartSearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub matched_concepts: Vec<Concept>,
    #[serde(default)]
    pub combinable_groups: Vec<CombinableGroup>,
    #[serde(default)]
    pub total: u32,
}

impl SmartSearchResponse {
    /// Whether there is anything worth showing in the side panel
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matched_concepts.is_empty() && self.combinable_groups.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub field: String,
    pub canonical: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Server-computed combinability report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub coverage_pct: f64,
    #[serde(default)]
    pub provinces_covered: Vec<String>,
    #[serde(default)]
    pub missing_provinces: Vec<String>,
    #[serde(default)]
    pub datasets_with_wfs: u32,
    #[serde(default)]
    pub total_datasets: u32,
    #[serde(default)]
    pub combinable: bool,
    #[serde(default)]
    pub common_fields: Vec<String>,
    #[serde(default)]
    pub all_fields: Vec<String>,
    #[serde(default)]
    pub field_mappings: Vec<FieldMapping>,
}

/// A dataset in a combination that exposes a WFS endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WfsService {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub province: Option<String>,
    pub url: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

/// Response of `/api/combine`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombineResponse {
    #[serde(default)]
    pub concept: Option<String>,
    #[serde(default)]
    pub name_de: Option<String>,
    pub analysis: Analysis,
    #[serde(default)]
    pub wfs_services: Vec<WfsService>,
    #[serde(default)]
    pub combination_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub topic: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicsResponse {
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// What a combination analysis is computed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombineTarget {
    /// An explicit list of record ids (the multi-selection)
    Ids(Vec<String>),
    /// Every dataset of a concept
    Concept(String),
}
