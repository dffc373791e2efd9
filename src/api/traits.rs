//! Core trait for the catalog read API

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{
    CombineResponse, CombineTarget, ConceptsResponse, DatasetDetail, GemsResponse,
    PromptResponse, SearchResponse, SmartSearchResponse, TopicsResponse,
};
use crate::session::SearchRequest;

/// Result type for catalog API calls
pub type Result<T> = std::result::Result<T, ApiError>;

/// The remote catalog, consumed through its documented request/response shapes
///
/// The session only ever talks to this trait, so tests substitute an
/// in-memory fake and the binary plugs in [`super::HttpCatalog`].
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /api/search`
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;

    /// `GET /api/dataset?id=`
    async fn dataset(&self, id: &str) -> Result<DatasetDetail>;

    /// `GET /api/gems?random=true&limit=`
    async fn gems(&self, limit: usize) -> Result<GemsResponse>;

    /// `GET /api/concepts`
    async fn concepts(&self) -> Result<ConceptsResponse>;

    /// `GET /api/smart-search?q=`
    async fn smart_search(&self, query: &str) -> Result<SmartSearchResponse>;

    /// `GET /api/combine?ids=` or `GET /api/combine?concept=`
    async fn combine(&self, target: &CombineTarget) -> Result<CombineResponse>;

    /// `GET /api/prompt?ids=`
    async fn prompt(&self, ids: &[String]) -> Result<PromptResponse>;

    /// `GET /api/topics`
    async fn topics(&self) -> Result<TopicsResponse>;
}
