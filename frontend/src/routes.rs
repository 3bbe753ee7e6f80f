//! Address-bar locations and the browser history they are written to.

use parking_lot::Mutex;
use serde::Serialize;

use crate::data_definitions::url_query::UrlQuery;

pub const SEARCH_PATH: &str = "/search";

/// `/search?<query>`, or the bare path when there is neither a term nor a filter.
pub fn search_location(query: &UrlQuery) -> String {
    let has_filters = query.filters.as_ref().is_some_and(|f| !f.is_empty());
    if query.term.is_empty() && !has_filters {
        SEARCH_PATH.to_string()
    } else {
        format!("{SEARCH_PATH}?{query}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HistoryMode {
    Push,
    Replace,
}

/// The browser's history stack, as seen by the search workflows.
pub trait BrowserHistory: Send + Sync {
    fn navigate(&self, location: &str, mode: HistoryMode);
    fn go_back(&self);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MemoryHistoryInner {
    entries: Vec<String>,
    cursor: usize,
}

/// History kept in memory. Used by the command line driver and the tests.
#[derive(Debug)]
pub struct MemoryHistory {
    inner: Mutex<MemoryHistoryInner>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHistory {
    pub fn new(initial_location: &str) -> Self {
        Self { inner: Mutex::new(MemoryHistoryInner { entries: vec![initial_location.to_string()], cursor: 0 }) }
    }

    pub fn location(&self) -> String {
        let inner = self.inner.lock();
        inner.entries[inner.cursor].clone()
    }

    pub fn entries(&self) -> Vec<String> {
        self.inner.lock().entries.clone()
    }
}

impl BrowserHistory for MemoryHistory {
    fn navigate(&self, location: &str, mode: HistoryMode) {
        let mut inner = self.inner.lock();
        match mode {
            HistoryMode::Push => {
                let keep = inner.cursor + 1;
                inner.entries.truncate(keep);
                inner.entries.push(location.to_string());
                inner.cursor = keep;
            }
            HistoryMode::Replace => {
                let cursor = inner.cursor;
                inner.entries[cursor] = location.to_string();
            }
        }
        tracing::debug!("history {:?}: {}", mode, location);
    }

    fn go_back(&self) {
        let mut inner = self.inner.lock();
        inner.cursor = inner.cursor.saturating_sub(1);
    }
}
