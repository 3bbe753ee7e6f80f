//! Search API calls and module exports.

mod search_resource;
pub use search_resource::search_resource;

pub mod search_request;
