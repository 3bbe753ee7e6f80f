//! Test doubles shared by the workflow tests.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use catalog_common::{
    resource::ResourceType,
    search_query::SearchQuery,
    search_result::{DashboardHit, ResourceHit, ResultSet, SearchResponse, TableHit, UserHit},
};
use parking_lot::Mutex;

use crate::{
    api::search_api::SearchApi,
    config::SearchConfig,
    routes::MemoryHistory,
    store::SearchStateStore,
    workflows::SearchContext,
};

pub(crate) struct Scripted {
    pub delay: Duration,
    pub response: Result<SearchResponse, String>,
}

impl Scripted {
    pub fn ok(response: SearchResponse) -> Self {
        Self { delay: Duration::ZERO, response: Ok(response) }
    }

    pub fn fail(message: &str) -> Self {
        Self { delay: Duration::ZERO, response: Err(message.to_string()) }
    }

    pub fn after(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }
}

type Responder = Box<dyn Fn(&SearchQuery) -> Scripted + Send + Sync>;

pub(crate) struct ScriptedSearchApi {
    responder: Responder,
    calls: Mutex<Vec<SearchQuery>>,
}

impl ScriptedSearchApi {
    pub fn new(responder: impl Fn(&SearchQuery) -> Scripted + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self { responder: Box::new(responder), calls: Mutex::new(Vec::new()) })
    }

    /// Answers every query with a page of `total` hits for its resource.
    pub fn with_totals(totals: &[(ResourceType, u64)]) -> Arc<Self> {
        let totals = totals.to_vec();
        Self::new(move |query| {
            let total = totals.iter().find(|(r, _)| *r == query.resource).map(|(_, t)| *t).unwrap_or(0);
            Scripted::ok(SearchResponse::for_resource(
                query.resource,
                result_page(query.resource, &query.term, total, query.page_index),
            ))
        })
    }

    pub fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SearchApi for ScriptedSearchApi {
    async fn search_resource(&self, query: SearchQuery) -> anyhow::Result<SearchResponse> {
        self.calls.lock().push(query.clone());
        let scripted = (self.responder)(&query);
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.response.map_err(|message| anyhow::anyhow!(message))
    }
}

pub(crate) fn result_page(resource: ResourceType, term: &str, total: u64, page_index: u32) -> ResultSet {
    let results = if total == 0 {
        Vec::new()
    } else {
        let hit = match resource {
            ResourceType::Table => ResourceHit::Table(TableHit { name: term.to_string(), ..Default::default() }),
            ResourceType::User => ResourceHit::User(UserHit { display_name: term.to_string(), ..Default::default() }),
            ResourceType::Dashboard => {
                ResourceHit::Dashboard(DashboardHit { name: term.to_string(), ..Default::default() })
            }
        };
        vec![hit]
    };
    ResultSet { page_index, total_results: total, results, next_page_token: None }
}

pub(crate) fn test_context(api: Arc<ScriptedSearchApi>) -> (Arc<SearchContext>, Arc<MemoryHistory>) {
    test_context_with(api, SearchConfig::default())
}

pub(crate) fn test_context_with(
    api: Arc<ScriptedSearchApi>,
    config: SearchConfig,
) -> (Arc<SearchContext>, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::new("/"));
    let ctx = SearchContext::new(api, SearchStateStore::default(), history.clone(), config);
    (ctx, history)
}
