use serde::{Deserialize, Serialize};

use crate::resource::ResourceType;


/// One page of hits for one resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultSet {
    pub page_index: u32,
    pub total_results: u64,
    pub results: Vec<ResourceHit>,
    pub next_page_token: Option<String>,
}

impl ResultSet {
    pub fn has_results(&self) -> bool {
        self.total_results > 0 || !self.results.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResourceHit {
    Table(TableHit),
    User(UserHit),
    Dashboard(DashboardHit),
}

impl ResourceHit {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceHit::Table(_) => ResourceType::Table,
            ResourceHit::User(_) => ResourceType::User,
            ResourceHit::Dashboard(_) => ResourceType::Dashboard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableHit {
    pub key: String,
    pub name: String,
    pub schema: String,
    pub database: String,
    pub cluster: String,
    pub description: String,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserHit {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub team_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardHit {
    pub uri: String,
    pub name: String,
    pub group_name: String,
    pub product: String,
    pub description: String,
}


/// Body returned by the search service. Only the field of the queried
/// resource is normally present; a missing field reads as an empty page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub tables: Option<ResultSet>,
    pub users: Option<ResultSet>,
    pub dashboards: Option<ResultSet>,
    pub msg: String,
}

impl SearchResponse {
    pub fn for_resource(resource: ResourceType, results: ResultSet) -> Self {
        let mut response = Self::default();
        match resource {
            ResourceType::Table => response.tables = Some(results),
            ResourceType::User => response.users = Some(results),
            ResourceType::Dashboard => response.dashboards = Some(results),
        }
        response
    }

    pub fn into_result_set(self, resource: ResourceType) -> ResultSet {
        let results = match resource {
            ResourceType::Table => self.tables,
            ResourceType::User => self.users,
            ResourceType::Dashboard => self.dashboards,
        };
        results.unwrap_or_default()
    }
}


/// Result pages for all three resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsByResource {
    pub tables: ResultSet,
    pub users: ResultSet,
    pub dashboards: ResultSet,
}

impl ResultsByResource {
    pub fn get(&self, resource: ResourceType) -> &ResultSet {
        match resource {
            ResourceType::Table => &self.tables,
            ResourceType::User => &self.users,
            ResourceType::Dashboard => &self.dashboards,
        }
    }

    pub fn set(&mut self, resource: ResourceType, results: ResultSet) {
        match resource {
            ResourceType::Table => self.tables = results,
            ResourceType::User => self.users = results,
            ResourceType::Dashboard => self.dashboards = results,
        }
    }
}
