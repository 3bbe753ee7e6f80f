pub mod search_service_utils;
