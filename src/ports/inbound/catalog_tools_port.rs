use crate::application::dto::{
    ImageLookupRequest, OperatorLookupRequest, ProjectLookupRequest, SearchImagesRequest,
    SearchOperatorsRequest, SearchProjectsRequest, SearchRepositoriesRequest,
    VulnerabilityLookupRequest,
};
use async_trait::async_trait;

/// CatalogToolsPort - Inbound port for the catalog lookup tools
///
/// This is the contract the tool-serving adapter (MCP over stdio) drives.
/// Every operation returns a text block: failures are rendered as an error
/// message in the returned text, never raised across this boundary.
#[async_trait]
pub trait CatalogToolsPort: Send + Sync {
    async fn search_images(&self, request: SearchImagesRequest) -> String;

    async fn get_image_details(&self, request: ImageLookupRequest) -> String;

    async fn get_image_vulnerabilities(&self, request: VulnerabilityLookupRequest) -> String;

    async fn search_certification_projects(&self, request: SearchProjectsRequest) -> String;

    async fn get_certification_project_details(&self, request: ProjectLookupRequest) -> String;

    async fn search_operators(&self, request: SearchOperatorsRequest) -> String;

    async fn get_operator_details(&self, request: OperatorLookupRequest) -> String;

    async fn search_repositories(&self, request: SearchRepositoriesRequest) -> String;
}
