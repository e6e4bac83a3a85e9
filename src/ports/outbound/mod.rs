/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach the Pyxis catalog service.
pub mod catalog_repository;

pub use catalog_repository::{entity_path, CatalogRepository, HttpMethod};
