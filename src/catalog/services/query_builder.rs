//! Translation of semantic search arguments into Pyxis query parameters.
//!
//! Free-text queries become `filter=<field>=match=<value>` expressions.
//! Other filters are sent as plain parameters, and only when they carry a
//! value: blank strings and `None` are omitted instead of sent empty.

/// Ordered list of query-string pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl Into<String>) -> Self {
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    /// Adds `filter=<field>=match=<query>` unless the query is blank
    pub fn match_filter(self, field: &str, query: Option<&str>) -> Self {
        match non_blank(query) {
            Some(query) => self.push("filter", format!("{}=match={}", field, query)),
            None => self,
        }
    }

    /// Adds `key=value` unless the value is blank
    pub fn optional(self, key: &str, value: Option<&str>) -> Self {
        match non_blank(value) {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn flag(self, key: &str, value: Option<bool>) -> Self {
        match value {
            Some(value) => self.push(key, value.to_string()),
            None => self,
        }
    }

    pub fn page(self, page: PageRequest) -> Self {
        self.push("page", page.page().to_string())
            .push("page_size", page.page_size().to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Page index and a page size clamped to what the service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Out-of-range sizes are clamped into `1..=100`, never rejected
    pub fn new(page: u32, page_size: i64) -> Self {
        let clamped = page_size.clamp(1, i64::from(Self::MAX_PAGE_SIZE));
        Self {
            page,
            page_size: clamped as u32,
        }
    }

    pub fn first(page_size: i64) -> Self {
        Self::new(0, page_size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, i64::from(Self::DEFAULT_PAGE_SIZE))
    }
}

/// Image search: `GET images`
#[derive(Debug, Clone, Default)]
pub struct ImageSearch {
    pub query: Option<String>,
    pub architecture: Option<String>,
    pub registry: Option<String>,
    pub certified: Option<bool>,
    pub page: PageRequest,
}

impl ImageSearch {
    pub const ENDPOINT: &'static str = "images";

    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .page(self.page)
            .match_filter("repositories.repository", self.query.as_deref())
            .optional("architecture", self.architecture.as_deref())
            .optional("registry", self.registry.as_deref())
            .flag("certified", self.certified)
    }
}

/// Certification project search: `GET projects/certification`
#[derive(Debug, Clone, Default)]
pub struct ProjectSearch {
    pub query: Option<String>,
    pub status: Option<String>,
    pub page: PageRequest,
}

impl ProjectSearch {
    pub const ENDPOINT: &'static str = "projects/certification";

    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .page(self.page)
            .match_filter("name", self.query.as_deref())
            .optional("certification_status", self.status.as_deref())
    }
}

/// Operator bundle search: `GET operators`
#[derive(Debug, Clone, Default)]
pub struct OperatorSearch {
    pub query: Option<String>,
    pub package: Option<String>,
    pub page: PageRequest,
}

impl OperatorSearch {
    pub const ENDPOINT: &'static str = "operators";

    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .page(self.page)
            .match_filter("bundle_path", self.query.as_deref())
            .optional("package", self.package.as_deref())
    }
}

/// Repository search: `GET repositories`
#[derive(Debug, Clone, Default)]
pub struct RepositorySearch {
    pub query: Option<String>,
    pub registry: Option<String>,
    pub page: PageRequest,
}

impl RepositorySearch {
    pub const ENDPOINT: &'static str = "repositories";

    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .page(self.page)
            .match_filter("repository", self.query.as_deref())
            .optional("registry", self.registry.as_deref())
    }
}
