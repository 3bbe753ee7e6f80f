//! Filter values attached to a search, per resource and per category.
//!
//! A category with no filter is never stored as an empty container: the
//! category key is simply absent. Every constructor and mutator here keeps
//! that shape, including deserialization from the URL or the wire.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};

use crate::resource::ResourceType;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Set of selected option ids. Serialized as `{"option": true, ...}`.
    Checkbox(BTreeSet<String>),
    /// Free text. Serialized as a plain string.
    Text(String),
}

impl FilterValue {
    pub fn checkbox<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::Checkbox(options.into_iter().map(|o| o.into()).collect())
    }

    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Checkbox(options) => options.is_empty(),
            FilterValue::Text(text) => text.is_empty(),
        }
    }
}

/// Text filters are matched case-insensitively and without surrounding blanks.
pub fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Text(text) => serializer.serialize_str(text),
            FilterValue::Checkbox(options) => {
                let mut map = serializer.serialize_map(Some(options.len()))?;
                for option in options {
                    map.serialize_entry(option, &true)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawFilterValue {
            Text(String),
            Checkbox(BTreeMap<String, bool>),
        }

        Ok(match RawFilterValue::deserialize(deserializer)? {
            RawFilterValue::Text(text) => FilterValue::Text(normalize_text(&text)),
            RawFilterValue::Checkbox(options) => FilterValue::Checkbox(
                options.into_iter().filter(|(_, checked)| *checked).map(|(option, _)| option).collect(),
            ),
        })
    }
}


/// Filters for one resource, keyed by category id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, FilterValue>", into = "BTreeMap<String, FilterValue>")]
pub struct FilterSet(BTreeMap<String, FilterValue>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category_id: &str) -> Option<&FilterValue> {
        self.0.get(category_id)
    }

    /// Sets or clears one category. `None` and empty values remove the key.
    pub fn set(&mut self, category_id: impl Into<String>, value: Option<FilterValue>) {
        let category_id = category_id.into();
        match value {
            Some(value) if !value.is_empty() => {
                self.0.insert(category_id, value);
            }
            _ => {
                self.0.remove(&category_id);
            }
        }
    }

    pub fn with(mut self, category_id: impl Into<String>, value: FilterValue) -> Self {
        self.set(category_id, Some(value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }
}

impl From<BTreeMap<String, FilterValue>> for FilterSet {
    fn from(map: BTreeMap<String, FilterValue>) -> Self {
        Self(map.into_iter().filter(|(_, value)| !value.is_empty()).collect())
    }
}

impl From<FilterSet> for BTreeMap<String, FilterValue> {
    fn from(set: FilterSet) -> Self {
        set.0
    }
}


/// Filters for every resource. Resources without filters are absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ResourceType, FilterSet>", into = "BTreeMap<ResourceType, FilterSet>")]
pub struct ResourceFilters(BTreeMap<ResourceType, FilterSet>);

impl ResourceFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters of one resource; an empty set when it has none.
    pub fn for_resource(&self, resource: ResourceType) -> FilterSet {
        self.0.get(&resource).cloned().unwrap_or_default()
    }

    pub fn set_resource(&mut self, resource: ResourceType, filters: FilterSet) {
        if filters.is_empty() {
            self.0.remove(&resource);
        } else {
            self.0.insert(resource, filters);
        }
    }

    pub fn with_resource(mut self, resource: ResourceType, filters: FilterSet) -> Self {
        self.set_resource(resource, filters);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn resources(&self) -> impl Iterator<Item = (&ResourceType, &FilterSet)> {
        self.0.iter()
    }
}

impl From<BTreeMap<ResourceType, FilterSet>> for ResourceFilters {
    fn from(map: BTreeMap<ResourceType, FilterSet>) -> Self {
        Self(map.into_iter().filter(|(_, filters)| !filters.is_empty()).collect())
    }
}

impl From<ResourceFilters> for BTreeMap<ResourceType, FilterSet> {
    fn from(filters: ResourceFilters) -> Self {
        filters.0
    }
}
