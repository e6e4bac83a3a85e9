use crate::catalog::services::{
    ImageSearch, OperatorSearch, ProjectSearch, QueryParams, RepositorySearch,
};
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// HTTP verbs the catalog primitive supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// `<collection>/<id>` with the id encoded as a single path segment
pub fn entity_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}

/// CatalogRepository port for reading Pyxis catalog data
///
/// Implementations provide only [`CatalogRepository::request`]; every other
/// operation is built on top of it. Payloads are returned as raw JSON: schema
/// validation belongs to the caller.
///
/// # Errors
/// Failures are raised as `PyxisError` inside the `anyhow::Error`:
/// - `Auth` for a missing credential or a 401 answer
/// - `Connection` for timeouts and unreachable hosts
/// - `Api` for other error statuses and non-JSON bodies
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Performs one request against `endpoint`, relative to the base URL
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &QueryParams,
        body: Option<&Value>,
    ) -> Result<Value>;

    async fn get(&self, endpoint: &str, params: &QueryParams) -> Result<Value> {
        self.request(HttpMethod::Get, endpoint, params, None).await
    }

    async fn post(&self, endpoint: &str, body: Option<&Value>, params: &QueryParams) -> Result<Value> {
        self.request(HttpMethod::Post, endpoint, params, body).await
    }

    async fn search_images(&self, search: &ImageSearch) -> Result<Value> {
        self.get(ImageSearch::ENDPOINT, &search.to_params()).await
    }

    async fn get_image_by_id(&self, image_id: &str) -> Result<Value> {
        self.get(&entity_path(ImageSearch::ENDPOINT, image_id), &QueryParams::new())
            .await
    }

    async fn get_image_vulnerabilities(&self, image_id: &str) -> Result<Value> {
        let endpoint = format!(
            "{}/vulnerabilities",
            entity_path(ImageSearch::ENDPOINT, image_id)
        );
        self.get(&endpoint, &QueryParams::new()).await
    }

    async fn search_certification_projects(&self, search: &ProjectSearch) -> Result<Value> {
        self.get(ProjectSearch::ENDPOINT, &search.to_params()).await
    }

    async fn get_certification_project(&self, project_id: &str) -> Result<Value> {
        self.get(&entity_path(ProjectSearch::ENDPOINT, project_id), &QueryParams::new())
            .await
    }

    async fn search_operators(&self, search: &OperatorSearch) -> Result<Value> {
        self.get(OperatorSearch::ENDPOINT, &search.to_params()).await
    }

    async fn get_operator_by_id(&self, operator_id: &str) -> Result<Value> {
        self.get(&entity_path(OperatorSearch::ENDPOINT, operator_id), &QueryParams::new())
            .await
    }

    async fn search_repositories(&self, search: &RepositorySearch) -> Result<Value> {
        self.get(RepositorySearch::ENDPOINT, &search.to_params()).await
    }

    async fn get_repository_by_id(&self, repository_id: &str) -> Result<Value> {
        self.get(
            &entity_path(RepositorySearch::ENDPOINT, repository_id),
            &QueryParams::new(),
        )
        .await
    }
}
