//! Keeps the address bar and the search state in step.
//!
//! Outbound, workflows publish `UrlQuery::from_state`. Inbound, a changed
//! location is parsed and compared with the current state; [`plan`] picks the
//! single workflow that reconciles them and [`UrlSynchronizer`] runs it.

use std::sync::Arc;

use catalog_common::{
    resource::ResourceType,
    search_filter::{FilterSet, ResourceFilters},
    search_query::SearchType,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::{
    data_definitions::{search_state::SearchState, url_query::UrlQuery},
    error::SearchError,
    routes::HistoryMode,
    workflows::{
        SearchContext,
        dispatcher::{MultiResourceSearchDispatcher, SearchAllRequest},
    },
};

/// A filter-apply search for one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSearch {
    pub resource: ResourceType,
    pub term: String,
    pub filters: FilterSet,
    pub page_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UrlSyncAction {
    /// A new term: full search over every resource with the merged filters.
    LoadSearch { term: String, resource: Option<ResourceType>, page_index: u32, filters: ResourceFilters },
    /// Another resource tab; searches only when its filters changed too.
    SwitchResource { resource: ResourceType, filter_search: Option<FilterSearch> },
    /// Same resource, different filters.
    ApplyFilters(FilterSearch),
    Paginate { resource: ResourceType, page_index: u32 },
    Unchanged,
}

/// Decides how to reconcile `state` with a parsed location. First match wins:
/// a new term, then a resource or filter change, then a page change.
pub fn plan(state: &SearchState, query: &UrlQuery) -> UrlSyncAction {
    if !query.term.is_empty() && query.term != state.search_term {
        return UrlSyncAction::LoadSearch {
            term: query.term.clone(),
            resource: query.resource,
            page_index: query.index.unwrap_or(0),
            filters: merge_url_filters(&state.filters, query),
        };
    }

    if let Some(resource) = query.resource {
        let filter_search = query
            .filters
            .as_ref()
            .map(|parsed| parsed.for_resource(resource))
            .filter(|parsed| *parsed != state.filters.for_resource(resource))
            .map(|filters| FilterSearch {
                resource,
                term: if query.term.is_empty() { state.search_term.clone() } else { query.term.clone() },
                filters,
                page_index: query.index.unwrap_or_else(|| state.page_index(resource)),
            });

        if state.resource != Some(resource) {
            return UrlSyncAction::SwitchResource { resource, filter_search };
        }
        if let Some(filter_search) = filter_search {
            return UrlSyncAction::ApplyFilters(filter_search);
        }
    }

    if let (Some(page_index), Some(resource)) = (query.index, query.resource.or(state.resource)) {
        if page_index != state.page_index(resource) {
            return UrlSyncAction::Paginate { resource, page_index };
        }
    }

    UrlSyncAction::Unchanged
}

// With a resource in the URL its filter set is replaced outright; without one
// every parsed resource entry is laid over the current filters.
fn merge_url_filters(current: &ResourceFilters, query: &UrlQuery) -> ResourceFilters {
    let Some(parsed) = &query.filters else {
        return current.clone();
    };
    match query.resource {
        Some(resource) => current.clone().with_resource(resource, parsed.for_resource(resource)),
        None => parsed
            .resources()
            .fold(current.clone(), |merged, (resource, filters)| merged.with_resource(*resource, filters.clone())),
    }
}

/// The location that restores `state`, or `EmptyTermNavigation` when there is
/// no search to return to.
pub fn previous_search_query(state: &SearchState) -> Result<UrlQuery, SearchError> {
    if state.search_term.is_empty() {
        return Err(SearchError::EmptyTermNavigation);
    }
    Ok(UrlQuery::from_state(state))
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviousSearch {
    Restored(String),
    WentBack,
}

pub struct UrlSynchronizer {
    ctx: Arc<SearchContext>,
    dispatcher: Arc<MultiResourceSearchDispatcher>,
}

impl UrlSynchronizer {
    pub fn new(ctx: Arc<SearchContext>, dispatcher: Arc<MultiResourceSearchDispatcher>) -> Self {
        Self { ctx, dispatcher }
    }

    /// Reacts to a changed location. URL-driven searches never write the URL back.
    pub async fn url_did_update(&self, url_search: &str) -> Result<UrlSyncAction, SearchError> {
        let query = UrlQuery::parse(url_search);
        let action = plan(&self.ctx.store.snapshot(), &query);
        tracing::info!("url {:?} -> {:?}", url_search, action);

        match &action {
            UrlSyncAction::LoadSearch { term, resource, page_index, filters } => {
                self.ctx.store.apply(|s| s.with_filters(filters.clone()));
                let request = SearchAllRequest {
                    search_type: SearchType::LoadFromUrl,
                    term: term.clone(),
                    resource: *resource,
                    page_index: *page_index,
                    use_existing_filters: true,
                    update_url: false,
                };
                self.dispatcher.search_all(request, CancellationToken::new()).await?;
            }
            UrlSyncAction::SwitchResource { resource, filter_search } => {
                self.ctx.store.apply(|s| s.with_resource(*resource));
                if let Some(filter_search) = filter_search {
                    self.run_filter_search(filter_search).await?;
                }
            }
            UrlSyncAction::ApplyFilters(filter_search) => self.run_filter_search(filter_search).await?,
            UrlSyncAction::Paginate { resource, page_index } => {
                let term = self.ctx.store.snapshot().search_term;
                self.dispatcher.search_resource(SearchType::Pagination, &term, *resource, *page_index).await?;
            }
            UrlSyncAction::Unchanged => {}
        }
        Ok(action)
    }

    async fn run_filter_search(&self, search: &FilterSearch) -> Result<(), SearchError> {
        self.ctx.store.apply(|s| s.with_resource_filters(search.resource, search.filters.clone()));
        self.dispatcher
            .search_resource(SearchType::FilterApply, &search.term, search.resource, search.page_index)
            .await?;
        Ok(())
    }

    /// Returns to the search page from elsewhere in the app.
    pub fn load_previous_search(&self) -> PreviousSearch {
        match previous_search_query(&self.ctx.store.snapshot()) {
            Ok(query) => PreviousSearch::Restored(self.ctx.publish_url(&query, Some(HistoryMode::Push))),
            Err(e) => {
                tracing::debug!("{}; navigating back", e);
                self.ctx.history.go_back();
                PreviousSearch::WentBack
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog_common::search_filter::FilterValue;

    use super::*;
    use crate::{
        routes::{BrowserHistory, MemoryHistory},
        testing::{ScriptedSearchApi, test_context},
    };

    fn hive() -> FilterSet {
        FilterSet::new().with("database", FilterValue::checkbox(["hive"]))
    }

    fn searched_state() -> SearchState {
        let mut state = SearchState::default().with_resource(ResourceType::Table);
        state.search_term = "customers".to_string();
        state.pagination.insert(ResourceType::Table, 1);
        state.filters = ResourceFilters::new().with_resource(ResourceType::Table, hive());
        state
    }

    fn synchronizer(api: Arc<ScriptedSearchApi>) -> (UrlSynchronizer, Arc<SearchContext>, Arc<MemoryHistory>) {
        let (ctx, history) = test_context(api);
        let dispatcher = Arc::new(MultiResourceSearchDispatcher::new(ctx.clone()));
        (UrlSynchronizer::new(ctx.clone(), dispatcher), ctx, history)
    }

    #[test]
    fn reflected_state_plans_nothing() {
        let state = searched_state();
        let url = UrlQuery::from_state(&state).to_string();
        assert_eq!(plan(&state, &UrlQuery::parse(&url)), UrlSyncAction::Unchanged);
    }

    #[test]
    fn new_term_with_resource_replaces_that_resource_filters() {
        let state = searched_state()
            .with_resource_filters(ResourceType::User, FilterSet::new().with("team", FilterValue::text("data")));
        let query = UrlQuery {
            term: "orders".to_string(),
            resource: Some(ResourceType::Table),
            index: None,
            filters: Some(ResourceFilters::new()),
        };

        let UrlSyncAction::LoadSearch { term, resource, page_index, filters } = plan(&state, &query) else {
            panic!("expected a full search");
        };
        assert_eq!(term, "orders");
        assert_eq!(resource, Some(ResourceType::Table));
        assert_eq!(page_index, 0);
        assert!(filters.for_resource(ResourceType::Table).is_empty());
        assert_eq!(filters.for_resource(ResourceType::User), state.filters.for_resource(ResourceType::User));
    }

    #[test]
    fn new_term_without_filters_keeps_current_filters() {
        let state = searched_state();
        let query = UrlQuery::parse("term=orders&index=3");
        assert_eq!(
            plan(&state, &query),
            UrlSyncAction::LoadSearch {
                term: "orders".to_string(),
                resource: None,
                page_index: 3,
                filters: state.filters.clone(),
            }
        );
    }

    #[test]
    fn changed_filters_on_the_same_resource_are_applied() {
        let state = searched_state();
        let filters = ResourceFilters::new().with_resource(ResourceType::Table, FilterSet::new());
        let query = UrlQuery { term: String::new(), resource: Some(ResourceType::Table), index: None, filters: Some(filters) };

        assert_eq!(
            plan(&state, &query),
            UrlSyncAction::ApplyFilters(FilterSearch {
                resource: ResourceType::Table,
                term: "customers".to_string(),
                filters: FilterSet::new(),
                page_index: 1,
            })
        );
    }

    #[test]
    fn page_change_targets_the_current_resource_when_none_is_given() {
        let state = searched_state();
        assert_eq!(
            plan(&state, &UrlQuery::parse("term=customers&index=4")),
            UrlSyncAction::Paginate { resource: ResourceType::Table, page_index: 4 }
        );

        let state = SearchState { resource: None, ..state };
        assert_eq!(plan(&state, &UrlQuery::parse("term=customers&index=4")), UrlSyncAction::Unchanged);
    }

    #[test]
    fn previous_search_needs_a_term() {
        assert_eq!(previous_search_query(&SearchState::default()), Err(SearchError::EmptyTermNavigation));
        assert_eq!(previous_search_query(&searched_state()).map(|q| q.index), Ok(Some(1)));
    }

    #[tokio::test]
    async fn switching_resource_with_equal_filters_runs_no_search() {
        let api = ScriptedSearchApi::with_totals(&[]);
        let (sync, ctx, history) = synchronizer(api.clone());
        ctx.store.apply(|_| searched_state());

        let action = sync.url_did_update("?term=customers&resource=user&index=2").await.unwrap();
        assert_eq!(action, UrlSyncAction::SwitchResource { resource: ResourceType::User, filter_search: None });
        assert!(api.calls().is_empty());
        assert_eq!(ctx.store.snapshot().resource, Some(ResourceType::User));
        assert_eq!(history.entries(), vec!["/"]);
    }

    #[tokio::test]
    async fn switching_resource_with_new_filters_searches_that_resource() {
        let api = ScriptedSearchApi::with_totals(&[(ResourceType::User, 3)]);
        let (sync, ctx, _history) = synchronizer(api.clone());
        ctx.store.apply(|_| searched_state());

        let team = FilterSet::new().with("team", FilterValue::text("data"));
        let filters = ResourceFilters::new().with_resource(ResourceType::User, team.clone());
        let url = UrlQuery { term: String::new(), resource: Some(ResourceType::User), index: Some(2), filters: Some(filters) };
        sync.url_did_update(&format!("/search?{url}")).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].resource, ResourceType::User);
        assert_eq!(calls[0].search_type, SearchType::FilterApply);
        assert_eq!(calls[0].term, "customers");
        assert_eq!(calls[0].page_index, 2);
        assert_eq!(calls[0].filters, team);

        let state = ctx.store.snapshot();
        assert_eq!(state.resource, Some(ResourceType::User));
        assert_eq!(state.results.users.total_results, 3);
        assert_eq!(state.page_index(ResourceType::User), 2);
    }

    #[tokio::test]
    async fn loading_a_term_from_the_url_searches_without_touching_history() {
        let api = ScriptedSearchApi::with_totals(&[(ResourceType::User, 4)]);
        let (sync, ctx, history) = synchronizer(api.clone());

        let action = sync.url_did_update("/search?term=ada&resource=user&index=1").await.unwrap();
        assert!(matches!(action, UrlSyncAction::LoadSearch { .. }));

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| c.search_type == SearchType::LoadFromUrl));
        assert_eq!(calls.iter().find(|c| c.resource == ResourceType::User).map(|c| c.page_index), Some(1));

        let state = ctx.store.snapshot();
        assert_eq!(state.search_term, "ada");
        assert_eq!(state.resource, Some(ResourceType::User));
        assert_eq!(history.entries(), vec!["/"]);

        // The same location again is already reflected.
        let action = sync.url_did_update("/search?term=ada&resource=user&index=1").await.unwrap();
        assert_eq!(action, UrlSyncAction::Unchanged);
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn page_change_queries_one_resource() {
        let api = ScriptedSearchApi::with_totals(&[(ResourceType::Table, 40)]);
        let (sync, ctx, _history) = synchronizer(api.clone());
        ctx.store.apply(|_| searched_state());

        sync.url_did_update("?term=customers&resource=table&index=3").await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].search_type, SearchType::Pagination);
        assert_eq!(calls[0].page_index, 3);
        assert_eq!(calls[0].filters, hive());
        assert_eq!(ctx.store.snapshot().page_index(ResourceType::Table), 3);
    }

    #[test]
    fn previous_search_goes_back_without_a_term() {
        let (sync, _ctx, history) = synchronizer(ScriptedSearchApi::with_totals(&[]));
        history.navigate("/table_detail/hive/core/orders", HistoryMode::Push);

        assert_eq!(sync.load_previous_search(), PreviousSearch::WentBack);
        assert_eq!(history.location(), "/");
    }

    #[test]
    fn previous_search_pushes_the_current_state() {
        let (sync, ctx, history) = synchronizer(ScriptedSearchApi::with_totals(&[]));
        ctx.store.apply(|_| searched_state());

        let location = "/search?term=customers&resource=table&index=1&filters=%7B%22table%22%3A%7B%22database%22%3A%7B%22hive%22%3Atrue%7D%7D%7D";
        assert_eq!(sync.load_previous_search(), PreviousSearch::Restored(location.to_string()));
        assert_eq!(history.entries(), vec!["/", location]);
    }
}
