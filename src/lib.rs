//! pyxis-mcp - MCP server for the Red Hat Pyxis container catalog
//!
//! This library exposes catalog lookups (container images, vulnerabilities,
//! certification projects, operator bundles and repositories) as text tools,
//! following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`catalog`): Entity schemas, query building and display policies
//! - **Application Layer** (`application`): Tool use cases and argument DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP client, text formatter and MCP server
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use pyxis_mcp::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let repository = LazyPyxisClient::new(ClientSettings::default().with_api_key("key"));
//! let tools = CatalogToolsUseCase::new(repository);
//!
//! let text = tools
//!     .search_images(SearchImagesRequest {
//!         query: "ubi9".to_string(),
//!         ..Default::default()
//!     })
//!     .await;
//! println!("{}", text);
//!
//! McpServer::new(tools).run().await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod catalog;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::McpServer;
    pub use crate::adapters::outbound::formatters::TextFormatter;
    pub use crate::adapters::outbound::network::{ClientSettings, LazyPyxisClient, PyxisClient};
    pub use crate::application::dto::{
        ImageLookupRequest, OperatorLookupRequest, ProjectLookupRequest, SearchImagesRequest,
        SearchOperatorsRequest, SearchProjectsRequest, SearchRepositoriesRequest,
        VulnerabilityLookupRequest,
    };
    pub use crate::application::use_cases::CatalogToolsUseCase;
    pub use crate::catalog::domain::{
        CertificationProject, ContainerImage, OperatorBundle, SearchResults, Vulnerability,
    };
    pub use crate::catalog::services::{PageRequest, QueryParams};
    pub use crate::ports::inbound::CatalogToolsPort;
    pub use crate::ports::outbound::{CatalogRepository, HttpMethod};
    pub use crate::shared::error::PyxisError;
    pub use crate::shared::Result;
}
