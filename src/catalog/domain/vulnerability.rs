use super::timestamp::{self, Timestamp};
use serde::Deserialize;

/// A CVE affecting a package inside an image.
///
/// `severity` is free text as reported by the service; ordering is imposed
/// at display time by `catalog::policies::severity_order`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Vulnerability {
    #[serde(default)]
    pub cve: Option<String>,
    #[serde(default)]
    pub cvss_score: Option<f64>,
    #[serde(default)]
    pub cvss_vector: Option<String>,
    #[serde(default)]
    pub cwe: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub public_date: Option<Timestamp>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub package_version: Option<String>,
    #[serde(default)]
    pub fixed_version: Option<String>,
}

impl Vulnerability {
    /// Severity label used for grouping; a missing or empty value groups as "Unknown"
    pub fn severity_label(&self) -> &str {
        self.severity
            .as_deref()
            .filter(|severity| !severity.is_empty())
            .unwrap_or("Unknown")
    }
}
