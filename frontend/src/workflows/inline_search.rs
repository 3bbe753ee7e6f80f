//! Type-ahead suggestions for the search bar.
//!
//! Keystrokes restart a debounce timer. When it expires, tables and users are
//! looked up in parallel; a newer lookup cancels an older one still in flight.
//! Selecting a suggestion either promotes the fetched suggestions into the
//! page results or, while they are still loading, runs a full search.

use std::sync::Arc;

use catalog_common::{
    resource::ResourceType,
    search_filter::FilterSet,
    search_query::SearchType,
};
use futures_util::future::try_join;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    data_definitions::{
        search_state::{InlineResultsState, SearchAllOutcome},
        url_query::UrlQuery,
    },
    error::SearchError,
    routes::HistoryMode,
    workflows::{
        LatestTask, SearchContext,
        dispatcher::{MultiResourceSearchDispatcher, SearchAllRequest},
        log_outcome,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InlineSearchPhase {
    Idle,
    Debouncing,
    Querying,
    Suggested,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InlineSelection {
    /// Suggestions were already loaded and became the page results.
    Promoted,
    /// Suggestions were still loading; a full search ran instead.
    Escalated(SearchAllOutcome),
}

pub struct InlineSearchCoordinator {
    ctx: Arc<SearchContext>,
    dispatcher: Arc<MultiResourceSearchDispatcher>,
    phase: Mutex<InlineSearchPhase>,
    debounce: Mutex<Option<JoinHandle<()>>>,
    lookahead: LatestTask,
}

impl InlineSearchCoordinator {
    pub fn new(ctx: Arc<SearchContext>, dispatcher: Arc<MultiResourceSearchDispatcher>) -> Self {
        Self {
            ctx,
            dispatcher,
            phase: Mutex::new(InlineSearchPhase::Idle),
            debounce: Mutex::new(None),
            lookahead: LatestTask::default(),
        }
    }

    pub fn phase(&self) -> InlineSearchPhase {
        *self.phase.lock()
    }

    fn set_phase(&self, phase: InlineSearchPhase) {
        *self.phase.lock() = phase;
    }

    /// Restarts the debounce window for `term`. A lookahead still running for
    /// an older term is cancelled, and suggestions are marked as loading right
    /// away so a quick selection knows they are not ready.
    pub fn on_keystroke(self: &Arc<Self>, term: impl Into<String>) {
        let term = term.into();
        let delay = self.ctx.config.inline_debounce;
        let this = Arc::clone(self);

        let mut debounce = self.debounce.lock();
        if let Some(pending) = debounce.take() {
            pending.abort();
        }
        self.lookahead.cancel();
        self.set_phase(InlineSearchPhase::Debouncing);
        self.ctx.store.apply(|s| s.inline_search_started());
        *debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!("inline search debounce elapsed: {:?}", term);
            this.spawn_lookahead(term);
        }));
    }

    fn spawn_lookahead(self: Arc<Self>, term: String) {
        let cancel = self.lookahead.begin();
        tokio::spawn(async move {
            let result = self.lookahead_search(&term, cancel).await;
            log_outcome("inline search", &result);
        });
    }

    /// Looks up tables and users for `term` and publishes the suggestions.
    pub async fn lookahead_search(
        &self,
        term: &str,
        cancel: CancellationToken,
    ) -> Result<InlineResultsState, SearchError> {
        self.set_phase(InlineSearchPhase::Querying);
        self.ctx.store.apply(|s| s.inline_search_started());

        let lookups = try_join(
            self.ctx.query(ResourceType::Table, 0, term, FilterSet::new(), SearchType::InlineSearch),
            self.ctx.query(ResourceType::User, 0, term, FilterSet::new(), SearchType::InlineSearch),
        );
        let joined = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SearchError::Superseded),
            joined = lookups => joined,
        };

        match joined {
            Ok((tables, users)) => {
                let state = self.ctx.store.apply(|s| s.inline_search_succeeded(tables, users));
                self.set_phase(InlineSearchPhase::Suggested);
                Ok(state.inline_results)
            }
            Err(SearchError::Superseded) => Err(SearchError::Superseded),
            Err(e) => {
                self.ctx.store.apply(|s| s.inline_search_failed());
                self.set_phase(InlineSearchPhase::Failed);
                Err(e)
            }
        }
    }

    fn abandon_pending(&self) {
        if let Some(pending) = self.debounce.lock().take() {
            pending.abort();
        }
        self.lookahead.cancel();
        self.set_phase(InlineSearchPhase::Idle);
    }

    /// Handles the user picking the `resource` entry of the suggestions for `term`.
    pub async fn select_inline_result(
        &self,
        term: &str,
        resource: ResourceType,
        update_url: bool,
        cancel: CancellationToken,
    ) -> Result<InlineSelection, SearchError> {
        let snapshot = self.ctx.store.snapshot();
        self.abandon_pending();

        if snapshot.inline_results.is_loading {
            tracing::info!("inline selection of {} for {:?} before suggestions loaded", resource, term);
            self.ctx.store.apply(|s| s.inline_results_discarded());
            let query = UrlQuery { term: term.to_string(), resource: Some(resource), index: Some(0), filters: None };
            self.ctx.publish_url(&query, Some(HistoryMode::Push));

            let request = SearchAllRequest {
                search_type: SearchType::InlineSelect,
                term: term.to_string(),
                resource: Some(resource),
                page_index: 0,
                use_existing_filters: false,
                update_url: false,
            };
            let outcome = self.dispatcher.search_all(request, cancel).await?;
            return Ok(InlineSelection::Escalated(outcome));
        }

        let promoted = self.ctx.store.apply(|s| s.promote_inline_results(term, resource));
        if update_url {
            self.ctx.publish_url(&UrlQuery::from_state(&promoted), Some(HistoryMode::Push));
        }
        Ok(InlineSelection::Promoted)
    }
}
