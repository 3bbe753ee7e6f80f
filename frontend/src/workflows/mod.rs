//! Asynchronous search workflows and what they share.

pub mod dispatcher;
pub mod inline_search;
pub mod url_sync;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use catalog_common::{
    resource::ResourceType,
    search_filter::FilterSet,
    search_query::{SearchQuery, SearchType},
    search_result::ResultSet,
};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::{
    api::search_api::SearchApi,
    config::SearchConfig,
    data_definitions::url_query::UrlQuery,
    error::SearchError,
    routes::{BrowserHistory, HistoryMode, search_location},
    store::SearchStateStore,
};

/// Collaborators every workflow reads from or writes to.
pub struct SearchContext {
    pub api: Arc<dyn SearchApi>,
    pub store: SearchStateStore,
    pub history: Arc<dyn BrowserHistory>,
    pub config: SearchConfig,
    has_searched: AtomicBool,
}

impl SearchContext {
    pub fn new(
        api: Arc<dyn SearchApi>,
        store: SearchStateStore,
        history: Arc<dyn BrowserHistory>,
        config: SearchConfig,
    ) -> Arc<Self> {
        Arc::new(Self { api, store, history, config, has_searched: AtomicBool::new(false) })
    }

    /// Queries one resource page and reads that resource's slice of the reply.
    pub async fn query(
        &self,
        resource: ResourceType,
        page_index: u32,
        term: &str,
        filters: FilterSet,
        search_type: SearchType,
    ) -> Result<ResultSet, SearchError> {
        let query = SearchQuery { resource, page_index, term: term.to_string(), filters, search_type };
        match self.api.search_resource(query).await {
            Ok(response) => Ok(response.into_result_set(resource)),
            Err(e) => Err(SearchError::remote(resource, e)),
        }
    }

    /// Records that a full search has completed, so the next published search pushes.
    pub fn mark_searched(&self) {
        self.has_searched.store(true, Ordering::SeqCst);
    }

    /// Writes a search location to the history. Without an explicit mode the
    /// first search of the session replaces the current entry and later ones push.
    pub fn publish_url(&self, query: &UrlQuery, mode: Option<HistoryMode>) -> String {
        let first = !self.has_searched.swap(true, Ordering::SeqCst);
        let mode = mode.unwrap_or(if first { HistoryMode::Replace } else { HistoryMode::Push });
        let location = search_location(query);
        self.history.navigate(&location, mode);
        location
    }
}

/// Cancellation slot for a take-latest intent: starting a new run cancels
/// the previous one.
#[derive(Debug, Default)]
pub struct LatestTask {
    current: Mutex<Option<CancellationToken>>,
}

impl LatestTask {
    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.current.lock().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    pub fn cancel(&self) {
        if let Some(current) = self.current.lock().take() {
            current.cancel();
        }
    }
}

pub(crate) fn log_outcome<T>(workflow: &str, result: &Result<T, SearchError>) {
    match result {
        Ok(_) => tracing::debug!("{} finished", workflow),
        Err(SearchError::Superseded) => tracing::debug!("{} superseded", workflow),
        Err(e) => tracing::warn!("{} failed: {}", workflow, e),
    }
}

#[cfg(test)]
mod tests {
    use catalog_common::resource::ResourceType;

    use super::*;
    use crate::testing::{ScriptedSearchApi, test_context};

    #[test]
    fn latest_task_cancels_the_previous_run() {
        let slot = LatestTask::default();
        let first = slot.begin();
        let second = slot.begin();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        slot.cancel();
        assert!(second.is_cancelled());
    }

    #[test]
    fn first_search_url_replaces_then_pushes() {
        let (ctx, history) = test_context(ScriptedSearchApi::with_totals(&[]));
        let query = |term: &str| UrlQuery { term: term.to_string(), resource: Some(ResourceType::Table), index: Some(0), filters: None };

        ctx.publish_url(&query("a"), None);
        ctx.publish_url(&query("b"), None);
        assert_eq!(
            history.entries(),
            vec!["/search?term=a&resource=table&index=0", "/search?term=b&resource=table&index=0"]
        );
    }
}
