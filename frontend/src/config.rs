//! Runtime configuration, read from the environment.

use std::time::Duration;

use catalog_common::search_const::INLINE_SEARCH_DEBOUNCE;

use crate::data_definitions::filter_state::FilterConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub inline_debounce: Duration,
    pub index_users_enabled: bool,
    pub index_dashboards_enabled: bool,
    pub filter_categories: FilterConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            inline_debounce: INLINE_SEARCH_DEBOUNCE,
            index_users_enabled: true,
            index_dashboards_enabled: true,
            filter_categories: FilterConfig::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let inline_debounce = std::env::var("INLINE_SEARCH_DEBOUNCE_MS")
            .ok()
            .and_then(|ms| ms.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.inline_debounce);
        Self {
            inline_debounce,
            index_users_enabled: env_flag("INDEX_USERS_ENABLED", defaults.index_users_enabled),
            index_dashboards_enabled: env_flag("INDEX_DASHBOARDS_ENABLED", defaults.index_dashboards_enabled),
            filter_categories: defaults.filter_categories,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => parse_flag(&value).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
