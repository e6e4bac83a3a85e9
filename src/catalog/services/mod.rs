/// Domain services - request parameter construction
mod query_builder;

pub use query_builder::{
    ImageSearch, OperatorSearch, PageRequest, ProjectSearch, QueryParams, RepositorySearch,
};
