use catalog_common::resource::ResourceType;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("search for {resource} failed: {message}")]
    RemoteCall { resource: ResourceType, message: String },

    #[error("malformed url parameter `{field}`: {reason}")]
    MalformedUrlState { field: &'static str, reason: String },

    #[error("no previous search term to restore")]
    EmptyTermNavigation,

    #[error("superseded by a newer search")]
    Superseded,
}

impl SearchError {
    pub fn remote(resource: ResourceType, err: anyhow::Error) -> Self {
        SearchError::RemoteCall { resource, message: format!("{err:#}") }
    }
}
