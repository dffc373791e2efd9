//! Catalog read API
//!
//! The session depends only on the [`CatalogApi`] trait and the wire types
//! in [`types`]. [`HttpCatalog`] is the production implementation.

mod client;
mod error;
mod traits;
pub mod types;

pub use client::HttpCatalog;
pub use error::ApiError;
pub use traits::{CatalogApi, Result};
pub use types::{
    Analysis, CombinableGroup, CombineResponse, CombineTarget, Concept, ConceptsResponse,
    DatasetDetail, FieldMapping, Gem, GemsResponse, PromptResponse, Record, SearchResponse,
    Service, SmartSearchResponse, Topic, TopicsResponse, WfsService,
};
