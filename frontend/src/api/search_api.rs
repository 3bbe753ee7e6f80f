//! Client API calls for the search service.

use async_trait::async_trait;
use catalog_backend::service_utils::search_service_utils::SearchServiceClient;
use catalog_common::{search_query::SearchQuery, search_result::SearchResponse};

/// One remote search call per resource. Any error is a hard failure of that call.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search_resource(&self, query: SearchQuery) -> anyhow::Result<SearchResponse>;
}

#[derive(Debug, Clone)]
pub struct BackendSearchApi {
    client: SearchServiceClient,
}

impl BackendSearchApi {
    pub fn new(client: SearchServiceClient) -> Self {
        Self { client }
    }

    pub fn from_env() -> Self {
        Self::new(SearchServiceClient::from_env())
    }
}

#[async_trait]
impl SearchApi for BackendSearchApi {
    async fn search_resource(&self, query: SearchQuery) -> anyhow::Result<SearchResponse> {
        catalog_backend::api::search::search_resource(&self.client, &query).await
    }
}
