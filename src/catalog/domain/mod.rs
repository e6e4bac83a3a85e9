/// Domain model - typed snapshots of Pyxis catalog entities
mod image;
mod operator;
mod project;
mod search_results;
pub mod timestamp;
mod vulnerability;

pub use image::{BrewBuild, ContainerImage, ContentSet, Repository};
pub use operator::OperatorBundle;
pub use project::CertificationProject;
pub use search_results::{parse_entity, parse_results, SearchResults};
pub use timestamp::Timestamp;
pub use vulnerability::Vulnerability;
