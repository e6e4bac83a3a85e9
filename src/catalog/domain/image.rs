use super::timestamp::{self, Timestamp};
use super::vulnerability::Vulnerability;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A registry/repository location an image is published to
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Repository {
    #[serde(default)]
    pub registry: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub push_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub published: Option<bool>,
}

/// Tags arrive either as bare strings or as `{"name": ..., "added_date": ...}`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTag {
    Name(String),
    Entry { name: String },
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Vec<RawTag>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|tags| {
        tags.into_iter()
            .map(|tag| match tag {
                RawTag::Name(name) | RawTag::Entry { name } => name,
            })
            .collect()
    }))
}

impl Repository {
    /// `registry/repository`, only when both halves are known
    pub fn location(&self) -> Option<String> {
        match (self.registry.as_deref(), self.repository.as_deref()) {
            (Some(registry), Some(repository)) if !registry.is_empty() && !repository.is_empty() => {
                Some(format!("{}/{}", registry, repository))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ContentSet {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BrewBuild {
    #[serde(default)]
    pub build: Option<String>,
    #[serde(default)]
    pub nvr: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

/// Container image metadata.
///
/// Only `_id` is required. Pyxis adds fields over time, so unknown keys are
/// ignored rather than rejected.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContainerImage {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub brew: Option<BrewBuild>,
    #[serde(default)]
    pub certified: Option<bool>,
    #[serde(default)]
    pub content_sets: Option<Vec<ContentSet>>,
    #[serde(default)]
    pub cpe_ids: Option<Vec<String>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub creation_date: Option<Timestamp>,
    #[serde(default)]
    pub docker_image_digest: Option<String>,
    #[serde(default)]
    pub freshness_grades: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub last_update_date: Option<Timestamp>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub parsed_data: Option<Map<String, Value>>,
    #[serde(default)]
    pub repositories: Option<Vec<Repository>>,
    #[serde(default)]
    pub sum_layer_size_bytes: Option<u64>,
    #[serde(default)]
    pub uncompressed_size_bytes: Option<u64>,
    #[serde(default)]
    pub vulnerabilities: Option<Vec<Vulnerability>>,
}

impl ContainerImage {
    pub fn is_certified(&self) -> bool {
        self.certified.unwrap_or(false)
    }

    pub fn repositories(&self) -> &[Repository] {
        self.repositories.as_deref().unwrap_or_default()
    }

    /// Compressed layer size in MiB
    pub fn size_mib(&self) -> Option<f64> {
        self.sum_layer_size_bytes
            .filter(|bytes| *bytes > 0)
            .map(|bytes| bytes as f64 / (1024.0 * 1024.0))
    }
}
