//! HTTP implementation of [`CatalogApi`] on top of `reqwest`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;
use super::traits::{CatalogApi, Result};
use super::types::{
    CombineResponse, CombineTarget, ConceptsResponse, DatasetDetail, GemsResponse,
    PromptResponse, SearchResponse, SmartSearchResponse, TopicsResponse,
};
use crate::session::SearchRequest;

/// Catalog client talking to the JSON endpoints under `{base_url}/api`
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a client for the catalog at `base_url`
    ///
    /// Every request is aborted after `timeout` and reported as
    /// [`ApiError::Timeout`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` if the base URL is empty or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::InvalidRequest("API base URL is empty".into()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Base URL this client sends requests to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{endpoint}", self.base_url);
        debug!(endpoint, ?params, "catalog request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(endpoint, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::from_reqwest(endpoint, &e))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.get("/api/search", &request.to_params()).await
    }

    async fn dataset(&self, id: &str) -> Result<DatasetDetail> {
        self.get("/api/dataset", &[("id", id.to_string())]).await
    }

    async fn gems(&self, limit: usize) -> Result<GemsResponse> {
        self.get(
            "/api/gems",
            &[("random", "true".to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn concepts(&self) -> Result<ConceptsResponse> {
        self.get("/api/concepts", &[]).await
    }

    async fn smart_search(&self, query: &str) -> Result<SmartSearchResponse> {
        self.get("/api/smart-search", &[("q", query.to_string())]).await
    }

    async fn combine(&self, target: &CombineTarget) -> Result<CombineResponse> {
        let params = match target {
            CombineTarget::Ids(ids) => [("ids", ids.join(","))],
            CombineTarget::Concept(concept) => [("concept", concept.clone())],
        };
        self.get("/api/combine", &params).await
    }

    async fn prompt(&self, ids: &[String]) -> Result<PromptResponse> {
        self.get("/api/prompt", &[("ids", ids.join(","))]).await
    }

    async fn topics(&self) -> Result<TopicsResponse> {
        self.get("/api/topics", &[]).await
    }
}
