/// Catalog domain - entity schema, query building and display policies
///
/// Nothing in here performs I/O. The types are snapshots of what the Pyxis
/// service returned for one request.
pub mod domain;
pub mod policies;
pub mod services;
