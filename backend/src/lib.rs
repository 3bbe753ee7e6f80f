//! Adapter for the remote catalog search service.

pub mod api;
pub mod service_utils;
