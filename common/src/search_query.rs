//! Shared search query models.

use serde::{Deserialize, Serialize};

use crate::{resource::ResourceType, search_filter::FilterSet};


/// Why a search was issued. Sent along with every query for analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchType {
    #[serde(rename = "submit_search_term")]
    SubmitTerm,
    #[serde(rename = "clear_search_term")]
    ClearTerm,
    #[serde(rename = "pagination")]
    Pagination,
    #[serde(rename = "filter")]
    FilterApply,
    #[serde(rename = "inline_search")]
    InlineSearch,
    #[serde(rename = "inline_select")]
    InlineSelect,
    #[serde(rename = "load_url")]
    LoadFromUrl,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::SubmitTerm => "submit_search_term",
            SearchType::ClearTerm => "clear_search_term",
            SearchType::Pagination => "pagination",
            SearchType::FilterApply => "filter",
            SearchType::InlineSearch => "inline_search",
            SearchType::InlineSelect => "inline_select",
            SearchType::LoadFromUrl => "load_url",
        }
    }
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


/// A single call to the search service: one resource, one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub resource: ResourceType,
    pub page_index: u32,
    pub term: String,
    pub filters: FilterSet,
    pub search_type: SearchType,
}
