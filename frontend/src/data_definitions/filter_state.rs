//! Filter categories and the pure filter update rules.

use std::collections::{BTreeMap, BTreeSet};

use catalog_common::{
    resource::ResourceType,
    search_filter::{FilterSet, FilterValue, normalize_text},
};

#[derive(Debug, Clone, PartialEq)]
pub enum FilterKind {
    Checkbox { options: Vec<String> },
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCategory {
    pub category_id: String,
    pub display_name: String,
    pub kind: FilterKind,
}

impl FilterCategory {
    pub fn checkbox(category_id: &str, display_name: &str, options: &[&str]) -> Self {
        Self {
            category_id: category_id.to_string(),
            display_name: display_name.to_string(),
            kind: FilterKind::Checkbox { options: options.iter().map(|option| option.to_string()).collect() },
        }
    }

    pub fn text(category_id: &str, display_name: &str) -> Self {
        Self { category_id: category_id.to_string(), display_name: display_name.to_string(), kind: FilterKind::Text }
    }

    pub fn offers_option(&self, option_id: &str) -> bool {
        match &self.kind {
            FilterKind::Checkbox { options } => options.iter().any(|option| option == option_id),
            FilterKind::Text => false,
        }
    }
}

/// Filter categories offered for each resource.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    categories: BTreeMap<ResourceType, Vec<FilterCategory>>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::empty().with_categories(
            ResourceType::Table,
            vec![
                FilterCategory::checkbox(
                    "database",
                    "Source",
                    &["bigquery", "hive", "presto", "redshift", "snowflake"],
                ),
                FilterCategory::text("schema", "Schema"),
                FilterCategory::text("table", "Table"),
                FilterCategory::text("column", "Column"),
            ],
        )
    }
}

impl FilterConfig {
    pub fn empty() -> Self {
        Self { categories: BTreeMap::new() }
    }

    pub fn with_categories(mut self, resource: ResourceType, categories: Vec<FilterCategory>) -> Self {
        self.categories.insert(resource, categories);
        self
    }

    pub fn categories(&self, resource: ResourceType) -> &[FilterCategory] {
        self.categories.get(&resource).map(|c| c.as_slice()).unwrap_or(&[])
    }

    pub fn category(&self, resource: ResourceType, category_id: &str) -> Option<&FilterCategory> {
        self.categories(resource).iter().find(|c| c.category_id == category_id)
    }
}

/// Returns the filters with `category_id` set to `value`, or removed when the
/// value is missing or empty. The configured kind of the category decides how
/// the value is read; a value of the wrong shape leaves the filters untouched.
pub fn update_filter_by_category(
    filters: &FilterSet,
    category: Option<&FilterCategory>,
    category_id: &str,
    value: Option<FilterValue>,
) -> FilterSet {
    let kind = category.map(|c| &c.kind);
    let value = match (kind, value) {
        (_, None) => None,
        (Some(FilterKind::Checkbox { .. }) | None, Some(FilterValue::Checkbox(options))) => Some(FilterValue::Checkbox(options)),
        (Some(FilterKind::Text) | None, Some(FilterValue::Text(text))) => Some(FilterValue::Text(normalize_text(&text))),
        (Some(kind), Some(value)) => {
            let name = category.map(|c| c.display_name.as_str()).unwrap_or(category_id);
            tracing::warn!("ignoring filter value {:?} for {} of kind {:?}", value, name, kind);
            return filters.clone();
        }
    };
    let mut filters = filters.clone();
    filters.set(category_id, value);
    filters
}

/// Adds or removes one checkbox option and returns the resulting value for the
/// category, or `None` once no option is left. An option the configured
/// category does not offer leaves the value as it is.
pub fn toggle_checkbox_option(
    filters: &FilterSet,
    category: Option<&FilterCategory>,
    category_id: &str,
    option_id: &str,
    checked: bool,
) -> Option<FilterValue> {
    if let Some(category) = category.filter(|c| !c.offers_option(option_id)) {
        tracing::warn!("{} has no option {:?}", category.display_name, option_id);
        return filters.get(category_id).cloned();
    }
    let mut options = match filters.get(category_id) {
        Some(FilterValue::Checkbox(options)) => options.clone(),
        _ => BTreeSet::new(),
    };
    if checked {
        options.insert(option_id.to_string());
    } else {
        options.remove(option_id);
    }
    if options.is_empty() { None } else { Some(FilterValue::Checkbox(options)) }
}
