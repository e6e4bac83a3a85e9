use super::timestamp::{self, Timestamp};
use serde::Deserialize;

/// Operator bundle metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OperatorBundle {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub bundle_path: Option<String>,
    #[serde(default)]
    pub csv_name: Option<String>,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub ocp_version: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub registry: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub creation_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub last_update_date: Option<Timestamp>,
    #[serde(default)]
    pub certified: Option<bool>,
}

impl OperatorBundle {
    /// CSV name, falling back to the package name
    pub fn display_name(&self) -> Option<&str> {
        self.csv_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.package_name.as_deref().filter(|name| !name.is_empty()))
    }

    pub fn is_certified(&self) -> bool {
        self.certified.unwrap_or(false)
    }
}
