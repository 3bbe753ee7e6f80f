//! Searchable resource categories.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Table,
    User,
    Dashboard,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [ResourceType::Table, ResourceType::User, ResourceType::Dashboard];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Table => "table",
            ResourceType::User => "user",
            ResourceType::Dashboard => "dashboard",
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownResourceType(pub String);

impl std::fmt::Display for UnknownResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown resource type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownResourceType {}

impl FromStr for ResourceType {
    type Err = UnknownResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(ResourceType::Table),
            "user" => Ok(ResourceType::User),
            "dashboard" => Ok(ResourceType::Dashboard),
            other => Err(UnknownResourceType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_what_it_displays() {
        for resource in ResourceType::ALL {
            assert_eq!(resource.to_string().parse::<ResourceType>(), Ok(resource));
        }
        assert_eq!("tables".parse::<ResourceType>(), Err(UnknownResourceType("tables".to_string())));
    }

    #[test]
    fn serializes_as_lowercase_name() {
        assert_eq!(serde_json::to_string(&ResourceType::Dashboard).unwrap(), "\"dashboard\"");
    }
}
