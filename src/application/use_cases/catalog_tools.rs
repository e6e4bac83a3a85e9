use crate::adapters::outbound::formatters::TextFormatter;
use crate::application::dto::{
    ImageLookupRequest, OperatorLookupRequest, ProjectLookupRequest, SearchImagesRequest,
    SearchOperatorsRequest, SearchProjectsRequest, SearchRepositoriesRequest,
    VulnerabilityLookupRequest,
};
use crate::catalog::domain::{
    parse_entity, parse_results, CertificationProject, ContainerImage, OperatorBundle,
    SearchResults, Vulnerability,
};
use crate::ports::inbound::CatalogToolsPort;
use crate::ports::outbound::CatalogRepository;
use crate::shared::error::PyxisError;
use crate::shared::Result;
use async_trait::async_trait;
use tracing::{debug, error};

const IMAGE: &str = "container image";
const PROJECT: &str = "certification project";
const OPERATOR: &str = "operator bundle";
const VULNERABILITY: &str = "vulnerability";

/// Turns the outcome of one tool call into the text handed back to the
/// caller. Catalog errors get the tool's own prefix; anything else is
/// reported as unexpected.
fn render_outcome(tool: &'static str, error_prefix: &str, outcome: Result<String>) -> String {
    match outcome {
        Ok(text) => text,
        Err(err) => match err.downcast_ref::<PyxisError>() {
            Some(pyxis_error) => {
                error!(tool, error = %pyxis_error, "Pyxis API error");
                format!("{}: {}", error_prefix, pyxis_error)
            }
            None => {
                error!(tool, error = %err, "Unexpected error");
                format!("Unexpected error: {}", err)
            }
        },
    }
}

fn required_id<'a>(value: &'a str, name: &str) -> std::result::Result<&'a str, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("Error: {} is required", name))
    } else {
        Ok(trimmed)
    }
}

/// CatalogToolsUseCase - the eight catalog lookup tools
///
/// Each tool issues exactly one catalog request, validates the payload and
/// renders it as text. Failures surface on first occurrence as an error
/// message; nothing is retried.
///
/// # Type Parameters
/// * `R` - CatalogRepository implementation
pub struct CatalogToolsUseCase<R> {
    repository: R,
    formatter: TextFormatter,
}

impl<R: CatalogRepository> CatalogToolsUseCase<R> {
    /// Creates a new CatalogToolsUseCase with an injected repository
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            formatter: TextFormatter::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    async fn try_search_images(&self, request: &SearchImagesRequest) -> Result<String> {
        let raw = self.repository.search_images(&request.to_search()).await?;
        let results: SearchResults<ContainerImage> = parse_results(IMAGE, raw)?;
        Ok(self.formatter.image_results(&results))
    }

    async fn try_get_image_details(&self, image_id: &str) -> Result<String> {
        let raw = self.repository.get_image_by_id(image_id).await?;
        let image: ContainerImage = parse_entity(IMAGE, raw)?;
        Ok(self.formatter.image_details(&image))
    }

    async fn try_get_image_vulnerabilities(&self, image_id: &str, display_cap: usize) -> Result<String> {
        let raw = self.repository.get_image_vulnerabilities(image_id).await?;
        let results: SearchResults<Vulnerability> = parse_results(VULNERABILITY, raw)?;
        Ok(self
            .formatter
            .vulnerability_report(image_id, &results, display_cap))
    }

    async fn try_search_projects(&self, request: &SearchProjectsRequest) -> Result<String> {
        let raw = self
            .repository
            .search_certification_projects(&request.to_search())
            .await?;
        let results: SearchResults<CertificationProject> = parse_results(PROJECT, raw)?;
        Ok(self.formatter.project_results(&results))
    }

    async fn try_get_project_details(&self, project_id: &str) -> Result<String> {
        let raw = self.repository.get_certification_project(project_id).await?;
        let project: CertificationProject = parse_entity(PROJECT, raw)?;
        Ok(self.formatter.project_details(&project))
    }

    async fn try_search_operators(&self, request: &SearchOperatorsRequest) -> Result<String> {
        let raw = self.repository.search_operators(&request.to_search()).await?;
        let results: SearchResults<OperatorBundle> = parse_results(OPERATOR, raw)?;
        Ok(self.formatter.operator_results(&results))
    }

    async fn try_get_operator_details(&self, operator_id: &str) -> Result<String> {
        let raw = self.repository.get_operator_by_id(operator_id).await?;
        let operator: OperatorBundle = parse_entity(OPERATOR, raw)?;
        Ok(self.formatter.operator_details(&operator))
    }

    async fn try_search_repositories(&self, request: &SearchRepositoriesRequest) -> Result<String> {
        let raw = self
            .repository
            .search_repositories(&request.to_search())
            .await?;
        Ok(self.formatter.repository_results(&raw))
    }
}

#[async_trait]
impl<R: CatalogRepository> CatalogToolsPort for CatalogToolsUseCase<R> {
    async fn search_images(&self, request: SearchImagesRequest) -> String {
        debug!(?request, "search_images");
        let outcome = self.try_search_images(&request).await;
        render_outcome("search_images", "Error searching images", outcome)
    }

    async fn get_image_details(&self, request: ImageLookupRequest) -> String {
        let image_id = match required_id(&request.image_id, "image_id") {
            Ok(id) => id,
            Err(message) => return message,
        };
        debug!(image_id, "get_image_details");
        let outcome = self.try_get_image_details(image_id).await;
        render_outcome("get_image_details", "Error getting image details", outcome)
    }

    async fn get_image_vulnerabilities(&self, request: VulnerabilityLookupRequest) -> String {
        let image_id = match required_id(&request.image_id, "image_id") {
            Ok(id) => id,
            Err(message) => return message,
        };
        debug!(image_id, max_results = request.max_results, "get_image_vulnerabilities");
        let outcome = self
            .try_get_image_vulnerabilities(image_id, request.display_cap())
            .await;
        render_outcome(
            "get_image_vulnerabilities",
            "Error getting vulnerabilities",
            outcome,
        )
    }

    async fn search_certification_projects(&self, request: SearchProjectsRequest) -> String {
        debug!(?request, "search_certification_projects");
        let outcome = self.try_search_projects(&request).await;
        render_outcome(
            "search_certification_projects",
            "Error searching certification projects",
            outcome,
        )
    }

    async fn get_certification_project_details(&self, request: ProjectLookupRequest) -> String {
        let project_id = match required_id(&request.project_id, "project_id") {
            Ok(id) => id,
            Err(message) => return message,
        };
        debug!(project_id, "get_certification_project_details");
        let outcome = self.try_get_project_details(project_id).await;
        render_outcome(
            "get_certification_project_details",
            "Error getting project details",
            outcome,
        )
    }

    async fn search_operators(&self, request: SearchOperatorsRequest) -> String {
        debug!(?request, "search_operators");
        let outcome = self.try_search_operators(&request).await;
        render_outcome("search_operators", "Error searching operators", outcome)
    }

    async fn get_operator_details(&self, request: OperatorLookupRequest) -> String {
        let operator_id = match required_id(&request.operator_id, "operator_id") {
            Ok(id) => id,
            Err(message) => return message,
        };
        debug!(operator_id, "get_operator_details");
        let outcome = self.try_get_operator_details(operator_id).await;
        render_outcome(
            "get_operator_details",
            "Error getting operator details",
            outcome,
        )
    }

    async fn search_repositories(&self, request: SearchRepositoriesRequest) -> String {
        debug!(?request, "search_repositories");
        let outcome = self.try_search_repositories(&request).await;
        render_outcome(
            "search_repositories",
            "Error searching repositories",
            outcome,
        )
    }
}
