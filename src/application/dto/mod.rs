/// Data Transfer Objects for application layer
///
/// DTOs carry tool arguments from the inbound adapter into the use case,
/// keeping the domain layer free of wire concerns.
mod tool_requests;

pub use tool_requests::{
    ImageLookupRequest, OperatorLookupRequest, ProjectLookupRequest, SearchImagesRequest,
    SearchOperatorsRequest, SearchProjectsRequest, SearchRepositoriesRequest,
    VulnerabilityLookupRequest,
};
