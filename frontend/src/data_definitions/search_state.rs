//! The search state tree and its transitions.
//!
//! Every transition borrows the current snapshot and returns the next one;
//! nothing here performs I/O. The store applies them one at a time.

use std::collections::BTreeMap;

use catalog_common::{
    resource::ResourceType,
    search_filter::{FilterSet, FilterValue, ResourceFilters},
    search_result::{ResultSet, ResultsByResource},
};
use serde::Serialize;

use crate::data_definitions::filter_state::{FilterConfig, update_filter_by_category};

/// Lookahead suggestions for the search bar. Rebuilt on every keystroke.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InlineResultsState {
    pub tables: ResultSet,
    pub users: ResultSet,
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchState {
    pub search_term: String,
    pub resource: Option<ResourceType>,
    pub filters: ResourceFilters,
    pub pagination: BTreeMap<ResourceType, u32>,
    pub results: ResultsByResource,
    pub is_loading: bool,
    pub inline_results: InlineResultsState,
}

/// A merged multi-resource search, ready to be published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchAllOutcome {
    pub search_term: String,
    pub resource: ResourceType,
    pub page_index: u32,
    pub pagination: BTreeMap<ResourceType, u32>,
    pub results: ResultsByResource,
}

impl SearchState {
    /// The resource filter widgets and pagination act on.
    pub fn active_resource(&self) -> ResourceType {
        self.resource.unwrap_or(ResourceType::Table)
    }

    pub fn page_index(&self, resource: ResourceType) -> u32 {
        self.pagination.get(&resource).copied().unwrap_or(0)
    }

    pub fn with_filters(&self, filters: ResourceFilters) -> Self {
        Self { filters, ..self.clone() }
    }

    pub fn with_resource(&self, resource: ResourceType) -> Self {
        Self { resource: Some(resource), ..self.clone() }
    }

    pub fn with_resource_filters(&self, resource: ResourceType, filters: FilterSet) -> Self {
        self.with_filters(self.filters.clone().with_resource(resource, filters))
    }

    pub fn with_filter_update(&self, config: &FilterConfig, category_id: &str, value: Option<FilterValue>) -> Self {
        let resource = self.active_resource();
        let current = self.filters.for_resource(resource);
        let updated = update_filter_by_category(&current, config.category(resource, category_id), category_id, value);
        self.with_resource_filters(resource, updated)
    }

    pub fn search_all_started(&self, term: &str) -> Self {
        Self { search_term: term.to_string(), is_loading: true, ..self.clone() }
    }

    pub fn search_all_succeeded(&self, outcome: &SearchAllOutcome) -> Self {
        Self {
            search_term: outcome.search_term.clone(),
            resource: Some(outcome.resource),
            pagination: outcome.pagination.clone(),
            results: outcome.results.clone(),
            is_loading: false,
            ..self.clone()
        }
    }

    /// Results and pagination go back to empty; term, resource and filters stay.
    pub fn search_all_failed(&self) -> Self {
        Self {
            pagination: BTreeMap::new(),
            results: ResultsByResource::default(),
            is_loading: false,
            ..self.clone()
        }
    }

    pub fn search_resource_started(&self) -> Self {
        Self { is_loading: true, ..self.clone() }
    }

    pub fn search_resource_succeeded(&self, resource: ResourceType, page_index: u32, results: ResultSet) -> Self {
        let mut next = Self { is_loading: false, ..self.clone() };
        next.results.set(resource, results);
        next.pagination.insert(resource, page_index);
        next
    }

    pub fn search_resource_failed(&self, resource: ResourceType) -> Self {
        let mut next = Self { is_loading: false, ..self.clone() };
        next.results.set(resource, ResultSet::default());
        next
    }

    pub fn inline_search_started(&self) -> Self {
        Self { inline_results: InlineResultsState { is_loading: true, ..Default::default() }, ..self.clone() }
    }

    pub fn inline_search_succeeded(&self, tables: ResultSet, users: ResultSet) -> Self {
        Self { inline_results: InlineResultsState { tables, users, is_loading: false }, ..self.clone() }
    }

    pub fn inline_search_failed(&self) -> Self {
        self.inline_results_discarded()
    }

    pub fn inline_results_discarded(&self) -> Self {
        Self { inline_results: InlineResultsState::default(), ..self.clone() }
    }

    /// Turns the fetched suggestions into the page results of a term-only search.
    pub fn promote_inline_results(&self, term: &str, resource: ResourceType) -> Self {
        Self {
            search_term: term.to_string(),
            resource: Some(resource),
            filters: ResourceFilters::new(),
            pagination: BTreeMap::new(),
            results: ResultsByResource {
                tables: self.inline_results.tables.clone(),
                users: self.inline_results.users.clone(),
                dashboards: ResultSet::default(),
            },
            is_loading: false,
            inline_results: InlineResultsState::default(),
        }
    }
}
