//! Search state as carried in the address bar.
//!
//! Shape: `term=<s>&resource=<table|user|dashboard>&index=<n>&filters=<json>`,
//! where `filters` is the JSON object `{resource: {category: value}}`.
//! Absent fields are omitted. Parsing never fails as a whole: a field that
//! cannot be read is dropped and reported in the log.

use std::fmt::Display;

use catalog_common::{resource::ResourceType, search_filter::ResourceFilters};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::{data_definitions::search_state::SearchState, error::SearchError};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UrlQuery {
    pub term: String,
    pub resource: Option<ResourceType>,
    pub index: Option<u32>,
    pub filters: Option<ResourceFilters>,
}

impl UrlQuery {
    /// The canonical query for a state: the page index travels with the
    /// resource, and only non-empty filters are written.
    pub fn from_state(state: &SearchState) -> Self {
        Self {
            term: state.search_term.clone(),
            resource: state.resource,
            index: state.resource.map(|resource| state.page_index(resource)),
            filters: if state.filters.is_empty() { None } else { Some(state.filters.clone()) },
        }
    }

    /// Parses a query string. A leading path and `?` are tolerated.
    pub fn parse(url_search: &str) -> Self {
        let query_string = match url_search.split_once('?') {
            Some((_, query)) => query,
            None => url_search,
        };

        let mut query = UrlQuery::default();
        for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
            let parsed = match key.as_ref() {
                "term" => {
                    query.term = value.into_owned();
                    Ok(())
                }
                "resource" => parse_resource(&value).map(|r| query.resource = Some(r)),
                "index" => parse_index(&value).map(|i| query.index = Some(i)),
                "filters" => parse_filters(&value).map(|f| query.filters = Some(f)),
                _ => Ok(()),
            };
            if let Err(e) = parsed {
                tracing::warn!("{}; treating it as absent", e);
            }
        }
        query
    }
}

pub fn parse_resource(raw: &str) -> Result<ResourceType, SearchError> {
    raw.parse::<ResourceType>()
        .map_err(|e| SearchError::MalformedUrlState { field: "resource", reason: e.to_string() })
}

pub fn parse_index(raw: &str) -> Result<u32, SearchError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| SearchError::MalformedUrlState { field: "index", reason: format!("{raw:?}: {e}") })
}

pub fn parse_filters(raw: &str) -> Result<ResourceFilters, SearchError> {
    serde_json::from_str::<ResourceFilters>(raw)
        .map_err(|e| SearchError::MalformedUrlState { field: "filters", reason: e.to_string() })
}

// Display writes the query string without the leading `?`.
impl Display for UrlQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.term.is_empty() {
            serializer.append_pair("term", &self.term);
        }
        if let Some(resource) = self.resource {
            serializer.append_pair("resource", resource.as_str());
        }
        if let Some(index) = self.index {
            serializer.append_pair("index", &index.to_string());
        }
        if let Some(filters) = self.filters.as_ref().filter(|f| !f.is_empty()) {
            if let Ok(json) = serde_json::to_string(filters) {
                serializer.append_pair("filters", &json);
            }
        }
        write!(f, "{}", serializer.finish())
    }
}
