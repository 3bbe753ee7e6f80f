//! Common library exports shared between frontend and backend.

extern crate serde;


pub mod resource;
pub mod search_query;
pub mod search_result;
pub mod search_filter;
pub mod search_const;
