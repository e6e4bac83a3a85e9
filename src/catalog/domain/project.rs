use super::timestamp::{self, Timestamp};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Partner certification project.
///
/// `container` is kept as an open map; its shape differs per project type.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CertificationProject {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub project_status: Option<String>,
    #[serde(default)]
    pub certification_status: Option<String>,
    #[serde(default, rename = "type")]
    pub project_type: Option<String>,
    #[serde(default)]
    pub application_type: Option<String>,
    #[serde(default)]
    pub vendor_label: Option<String>,
    #[serde(default)]
    pub registry_override_instruct: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub creation_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub last_update_date: Option<Timestamp>,
    #[serde(default)]
    pub container: Option<Map<String, Value>>,
}
