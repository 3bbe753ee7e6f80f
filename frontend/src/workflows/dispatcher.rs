//! Full searches across every resource, and single-resource refinements.

use std::{collections::BTreeMap, sync::Arc};

use catalog_common::{
    resource::ResourceType,
    search_const::RESOURCE_PRECEDENCE,
    search_filter::ResourceFilters,
    search_query::SearchType,
    search_result::{ResultSet, ResultsByResource},
};
use futures_util::future::try_join3;
use tokio_util::sync::CancellationToken;

use crate::{
    config::SearchConfig,
    data_definitions::{search_state::SearchAllOutcome, url_query::UrlQuery},
    error::SearchError,
    workflows::SearchContext,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchAllRequest {
    pub search_type: SearchType,
    pub term: String,
    pub resource: Option<ResourceType>,
    pub page_index: u32,
    pub use_existing_filters: bool,
    pub update_url: bool,
}

/// First resource in precedence order that returned anything; tables otherwise.
pub fn auto_select_resource(results: &ResultsByResource, config: &SearchConfig) -> ResourceType {
    RESOURCE_PRECEDENCE
        .into_iter()
        .filter(|resource| match resource {
            ResourceType::Table => true,
            ResourceType::User => config.index_users_enabled,
            ResourceType::Dashboard => config.index_dashboards_enabled,
        })
        .find(|resource| results.get(*resource).has_results())
        .unwrap_or(ResourceType::Table)
}

pub struct MultiResourceSearchDispatcher {
    ctx: Arc<SearchContext>,
}

impl MultiResourceSearchDispatcher {
    pub fn new(ctx: Arc<SearchContext>) -> Self {
        Self { ctx }
    }

    /// Queries all three resources at once and publishes the merged result.
    /// One failed query fails the whole search; a cancelled search publishes nothing.
    pub async fn search_all(
        &self,
        request: SearchAllRequest,
        cancel: CancellationToken,
    ) -> Result<SearchAllOutcome, SearchError> {
        if cancel.is_cancelled() {
            return Err(SearchError::Superseded);
        }
        tracing::info!(
            "search all ({}): {:?} resource={:?} page={}",
            request.search_type,
            request.term,
            request.resource,
            request.page_index
        );

        let store = &self.ctx.store;
        if !request.use_existing_filters {
            store.apply(|s| s.with_filters(ResourceFilters::new()));
        }
        let snapshot = store.apply(|s| s.search_all_started(&request.term));

        let pagination: BTreeMap<ResourceType, u32> = ResourceType::ALL
            .into_iter()
            .map(|resource| {
                let index = if request.resource == Some(resource) { request.page_index } else { 0 };
                (resource, index)
            })
            .collect();
        let page_of = |resource: ResourceType| pagination.get(&resource).copied().unwrap_or(0);
        let query = |resource: ResourceType| {
            self.ctx.query(
                resource,
                page_of(resource),
                &request.term,
                snapshot.filters.for_resource(resource),
                request.search_type,
            )
        };

        let fan_out = try_join3(query(ResourceType::Table), query(ResourceType::User), query(ResourceType::Dashboard));
        let joined = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SearchError::Superseded),
            joined = fan_out => joined,
        };

        let (tables, users, dashboards) = match joined {
            Ok(results) => results,
            Err(SearchError::Superseded) => return Err(SearchError::Superseded),
            Err(e) => {
                store.apply(|s| s.search_all_failed());
                return Err(e);
            }
        };

        let results = ResultsByResource { tables, users, dashboards };
        let resource = request.resource.unwrap_or_else(|| auto_select_resource(&results, &self.ctx.config));
        let outcome = SearchAllOutcome {
            search_term: request.term.clone(),
            resource,
            page_index: page_of(resource),
            pagination: pagination.clone(),
            results,
        };

        let published = store.apply(|s| s.search_all_succeeded(&outcome));
        if request.update_url {
            self.ctx.publish_url(&UrlQuery::from_state(&published), None);
        } else {
            self.ctx.mark_searched();
        }
        tracing::info!("search all ({}) selected {} page {}", request.search_type, outcome.resource, outcome.page_index);
        Ok(outcome)
    }

    /// Queries one resource with its current filters; only that slice changes.
    pub async fn search_resource(
        &self,
        search_type: SearchType,
        term: &str,
        resource: ResourceType,
        page_index: u32,
    ) -> Result<ResultSet, SearchError> {
        tracing::info!("search {} ({}): {:?} page={}", resource, search_type, term, page_index);
        let store = &self.ctx.store;
        let snapshot = store.apply(|s| s.search_resource_started());
        let filters = snapshot.filters.for_resource(resource);

        match self.ctx.query(resource, page_index, term, filters, search_type).await {
            Ok(results) => {
                store.apply(|s| s.search_resource_succeeded(resource, page_index, results.clone()));
                Ok(results)
            }
            Err(e) => {
                store.apply(|s| s.search_resource_failed(resource));
                Err(e)
            }
        }
    }
}
