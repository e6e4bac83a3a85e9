/// Mock implementations for testing
mod mock_catalog_repository;

pub use mock_catalog_repository::{MockCatalogRepository, RecordedCall};
