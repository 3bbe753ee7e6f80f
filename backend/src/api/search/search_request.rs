//! Request body builder for the search service.

use catalog_common::{
    resource::ResourceType,
    search_const::RESULTS_PER_PAGE,
    search_filter::FilterSet,
    search_query::{SearchQuery, SearchType},
};
use serde::{Deserialize, Serialize};

pub const SEARCH_API_PREFIX: &'static str = "/api/search/v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequestBody {
    pub query_term: String,
    pub page_index: u32,
    pub results_per_page: u32,
    pub filters: FilterSet,
    pub search_type: SearchType,
}

pub fn search_endpoint_path(resource: ResourceType) -> String {
    format!("{SEARCH_API_PREFIX}/{resource}")
}

pub fn build_search_request_body(query: &SearchQuery) -> SearchRequestBody {
    SearchRequestBody {
        query_term: query.term.trim().to_string(),
        page_index: query.page_index,
        results_per_page: RESULTS_PER_PAGE,
        filters: query.filters.clone(),
        search_type: query.search_type,
    }
}

#[cfg(test)]
mod tests {
    use catalog_common::search_filter::FilterValue;

    use super::*;

    #[test]
    fn body_carries_trimmed_term_and_filters() {
        let query = SearchQuery {
            resource: ResourceType::Table,
            page_index: 3,
            term: "  revenue ".to_string(),
            filters: FilterSet::new().with("database", FilterValue::checkbox(["hive"])),
            search_type: SearchType::Pagination,
        };
        let body = serde_json::to_value(build_search_request_body(&query)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "query_term": "revenue",
                "page_index": 3,
                "results_per_page": 10,
                "filters": {"database": {"hive": true}},
                "search_type": "pagination",
            })
        );
    }

    #[test]
    fn endpoint_is_named_after_the_resource() {
        assert_eq!(search_endpoint_path(ResourceType::Dashboard), "/api/search/v1/dashboard");
    }
}
