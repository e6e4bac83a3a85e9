/// Use cases module containing application business logic orchestration
mod catalog_tools;

pub use catalog_tools::CatalogToolsUseCase;
