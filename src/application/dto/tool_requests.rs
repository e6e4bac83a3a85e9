//! Argument DTOs for the catalog tools.
//!
//! Every field has a default so a tool call with missing arguments still
//! deserializes; blank identifiers are reported by the use case instead.

use crate::catalog::policies::DisplayLimits;
use crate::catalog::services::{
    ImageSearch, OperatorSearch, PageRequest, ProjectSearch, RepositorySearch,
};
use serde::Deserialize;

fn default_max_results() -> i64 {
    i64::from(PageRequest::DEFAULT_PAGE_SIZE)
}

fn default_max_vulnerabilities() -> i64 {
    DisplayLimits::DEFAULT_VULNERABILITIES
}

fn cleaned(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchImagesRequest {
    /// Search query for image names/repositories
    pub query: String,
    /// Architecture filter, e.g. `amd64`
    pub architecture: String,
    /// Registry filter, e.g. `registry.redhat.io`
    pub registry: String,
    /// Only certified images; `false` means no certification filter
    pub certified: bool,
    pub max_results: i64,
}

impl Default for SearchImagesRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            architecture: String::new(),
            registry: String::new(),
            certified: false,
            max_results: default_max_results(),
        }
    }
}

impl SearchImagesRequest {
    pub fn to_search(&self) -> ImageSearch {
        ImageSearch {
            query: cleaned(&self.query),
            architecture: cleaned(&self.architecture),
            registry: cleaned(&self.registry),
            certified: self.certified.then_some(true),
            page: PageRequest::first(self.max_results),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageLookupRequest {
    pub image_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct VulnerabilityLookupRequest {
    pub image_id: String,
    /// Number of vulnerabilities rendered, clamped to 1..=100
    pub max_results: i64,
}

impl Default for VulnerabilityLookupRequest {
    fn default() -> Self {
        Self {
            image_id: String::new(),
            max_results: default_max_vulnerabilities(),
        }
    }
}

impl VulnerabilityLookupRequest {
    pub fn display_cap(&self) -> usize {
        PageRequest::first(self.max_results).page_size() as usize
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchProjectsRequest {
    pub query: String,
    /// Certification status filter
    pub status: String,
    pub max_results: i64,
}

impl Default for SearchProjectsRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            status: String::new(),
            max_results: default_max_results(),
        }
    }
}

impl SearchProjectsRequest {
    pub fn to_search(&self) -> ProjectSearch {
        ProjectSearch {
            query: cleaned(&self.query),
            status: cleaned(&self.status),
            page: PageRequest::first(self.max_results),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectLookupRequest {
    pub project_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchOperatorsRequest {
    pub query: String,
    pub package: String,
    pub max_results: i64,
}

impl Default for SearchOperatorsRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            package: String::new(),
            max_results: default_max_results(),
        }
    }
}

impl SearchOperatorsRequest {
    pub fn to_search(&self) -> OperatorSearch {
        OperatorSearch {
            query: cleaned(&self.query),
            package: cleaned(&self.package),
            page: PageRequest::first(self.max_results),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct OperatorLookupRequest {
    pub operator_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchRepositoriesRequest {
    pub query: String,
    pub registry: String,
    pub max_results: i64,
}

impl Default for SearchRepositoriesRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            registry: String::new(),
            max_results: default_max_results(),
        }
    }
}

impl SearchRepositoriesRequest {
    pub fn to_search(&self) -> RepositorySearch {
        RepositorySearch {
            query: cleaned(&self.query),
            registry: cleaned(&self.registry),
            page: PageRequest::first(self.max_results),
        }
    }
}
