//! Search call for one resource page.

use catalog_common::{search_query::SearchQuery, search_result::SearchResponse};

use crate::api::search::search_request::{build_search_request_body, search_endpoint_path};
use crate::service_utils::search_service_utils::SearchServiceClient;

pub async fn search_resource(client: &SearchServiceClient, query: &SearchQuery) -> anyhow::Result<SearchResponse> {
    let body = build_search_request_body(query);
    let path = search_endpoint_path(query.resource);
    tracing::debug!(
        "search {} page {} ({}): {:?}",
        query.resource,
        query.page_index,
        query.search_type,
        body.query_term
    );
    let response = client.post_json::<_, SearchResponse>(&path, &body).await?;
    Ok(response)
}
