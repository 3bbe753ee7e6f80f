//! Search orchestration for the catalog: state store, filters, inline
//! lookahead, multi-resource search and address-bar synchronization.

pub mod app;
pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod data_definitions;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;
