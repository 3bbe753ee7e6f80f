//! The intent surface the search page calls into.
//!
//! Each intent either applies a pure transition right away or spawns the
//! matching workflow. Full term searches are take-latest; resource searches,
//! pagination, filter changes and navigation events are take-every.

use std::{future::Future, sync::Arc};

use catalog_common::{
    resource::ResourceType,
    search_filter::{FilterSet, FilterValue, ResourceFilters},
    search_query::SearchType,
    search_result::ResultSet,
};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    api::search_api::SearchApi,
    config::SearchConfig,
    data_definitions::{
        filter_state::toggle_checkbox_option,
        search_state::{SearchAllOutcome, SearchState},
        url_query::UrlQuery,
    },
    error::SearchError,
    routes::{BrowserHistory, HistoryMode},
    store::SearchStateStore,
    workflows::{
        LatestTask, SearchContext,
        dispatcher::{MultiResourceSearchDispatcher, SearchAllRequest},
        inline_search::{InlineSearchCoordinator, InlineSearchPhase, InlineSelection},
        log_outcome,
        url_sync::{PreviousSearch, UrlSyncAction, UrlSynchronizer},
    },
};

/// A search of one resource. Fields left as `None` fall back to the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitSearchResource {
    pub term: Option<String>,
    pub resource: Option<ResourceType>,
    pub filters: Option<FilterSet>,
    pub page_index: u32,
    pub search_type: SearchType,
    pub update_url: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchStateUpdate {
    pub filters: Option<ResourceFilters>,
    pub resource: Option<ResourceType>,
    pub update_url: bool,
}

pub struct SearchApp {
    ctx: Arc<SearchContext>,
    dispatcher: Arc<MultiResourceSearchDispatcher>,
    inline: Arc<InlineSearchCoordinator>,
    url_sync: Arc<UrlSynchronizer>,
    full_search: LatestTask,
}

fn spawn_logged<T, F>(workflow: &'static str, work: F) -> JoinHandle<Result<T, SearchError>>
where
    T: Send + 'static,
    F: Future<Output = Result<T, SearchError>> + Send + 'static,
{
    tokio::spawn(async move {
        let result = work.await;
        log_outcome(workflow, &result);
        result
    })
}

impl SearchApp {
    pub fn new(api: Arc<dyn SearchApi>, history: Arc<dyn BrowserHistory>, config: SearchConfig) -> Self {
        Self::with_context(SearchContext::new(api, SearchStateStore::default(), history, config))
    }

    pub fn with_context(ctx: Arc<SearchContext>) -> Self {
        let dispatcher = Arc::new(MultiResourceSearchDispatcher::new(ctx.clone()));
        let inline = Arc::new(InlineSearchCoordinator::new(ctx.clone(), dispatcher.clone()));
        let url_sync = Arc::new(UrlSynchronizer::new(ctx.clone(), dispatcher.clone()));
        Self { ctx, dispatcher, inline, url_sync, full_search: LatestTask::default() }
    }

    pub fn snapshot(&self) -> SearchState {
        self.ctx.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.ctx.store.subscribe()
    }

    pub fn inline_phase(&self) -> InlineSearchPhase {
        self.inline.phase()
    }

    /// Searches every resource for a new term. Cancels the previous submission.
    pub fn submit_search(&self, term: &str, use_filters: bool) -> JoinHandle<Result<SearchAllOutcome, SearchError>> {
        let search_type = if term.is_empty() { SearchType::ClearTerm } else { SearchType::SubmitTerm };
        let request = SearchAllRequest {
            search_type,
            term: term.to_string(),
            resource: None,
            page_index: 0,
            use_existing_filters: use_filters,
            update_url: true,
        };
        let cancel = self.full_search.begin();
        let dispatcher = self.dispatcher.clone();
        spawn_logged("submit search", async move { dispatcher.search_all(request, cancel).await })
    }

    pub fn submit_search_resource(&self, submit: SubmitSearchResource) -> JoinHandle<Result<ResultSet, SearchError>> {
        let snapshot = self.ctx.store.snapshot();
        let resource = submit.resource.unwrap_or(snapshot.active_resource());
        let term = submit.term.unwrap_or(snapshot.search_term);
        if let Some(filters) = submit.filters {
            self.ctx.store.apply(|s| s.with_resource_filters(resource, filters));
        }

        if submit.update_url {
            let filters = self.ctx.store.snapshot().filters;
            let query = UrlQuery {
                term: term.clone(),
                resource: Some(resource),
                index: Some(submit.page_index),
                filters: if filters.is_empty() { None } else { Some(filters) },
            };
            self.ctx.publish_url(&query, Some(HistoryMode::Push));
        }

        let dispatcher = self.dispatcher.clone();
        spawn_logged("resource search", async move {
            dispatcher.search_resource(submit.search_type, &term, resource, submit.page_index).await
        })
    }

    /// Re-runs the active resource with its current filters from the first page.
    pub fn apply_filters(&self) -> JoinHandle<Result<ResultSet, SearchError>> {
        self.submit_search_resource(SubmitSearchResource {
            term: None,
            resource: None,
            filters: None,
            page_index: 0,
            search_type: SearchType::FilterApply,
            update_url: true,
        })
    }

    pub fn set_page_index(&self, page_index: u32, update_url: bool) -> JoinHandle<Result<ResultSet, SearchError>> {
        self.submit_search_resource(SubmitSearchResource {
            term: None,
            resource: None,
            filters: None,
            page_index,
            search_type: SearchType::Pagination,
            update_url,
        })
    }

    /// Sets or clears one filter of the active resource. Does not search.
    pub fn update_filter_by_category(&self, category_id: &str, value: Option<FilterValue>) -> SearchState {
        let config = &self.ctx.config.filter_categories;
        self.ctx.store.apply(|s| s.with_filter_update(config, category_id, value))
    }

    pub fn toggle_checkbox_filter(&self, category_id: &str, option_id: &str, checked: bool) -> SearchState {
        let config = &self.ctx.config.filter_categories;
        self.ctx.store.apply(|s| {
            let resource = s.active_resource();
            let current = s.filters.for_resource(resource);
            let category = config.category(resource, category_id);
            let value = toggle_checkbox_option(&current, category, category_id, option_id, checked);
            s.with_filter_update(config, category_id, value)
        })
    }

    pub fn update_search_state(&self, update: SearchStateUpdate) -> SearchState {
        let state = self.ctx.store.apply(|s| {
            let s = match update.filters {
                Some(filters) => s.with_filters(filters),
                None => s.clone(),
            };
            match update.resource {
                Some(resource) => s.with_resource(resource),
                None => s,
            }
        });
        if update.update_url {
            self.ctx.publish_url(&UrlQuery::from_state(&state), Some(HistoryMode::Push));
        }
        state
    }

    pub fn inline_search(&self, term: &str) {
        self.inline.on_keystroke(term);
    }

    /// Picking a suggestion replaces any full term search still running.
    pub fn select_inline_result(
        &self,
        term: &str,
        resource: ResourceType,
        update_url: bool,
    ) -> JoinHandle<Result<InlineSelection, SearchError>> {
        let cancel = self.full_search.begin();
        let inline = self.inline.clone();
        let term = term.to_string();
        spawn_logged("inline selection", async move {
            inline.select_inline_result(&term, resource, update_url, cancel).await
        })
    }

    pub fn url_did_update(&self, url_search: &str) -> JoinHandle<Result<UrlSyncAction, SearchError>> {
        let url_sync = self.url_sync.clone();
        let url_search = url_search.to_string();
        spawn_logged("url update", async move { url_sync.url_did_update(&url_search).await })
    }

    pub fn load_previous_search(&self) -> PreviousSearch {
        self.url_sync.load_previous_search()
    }
}
