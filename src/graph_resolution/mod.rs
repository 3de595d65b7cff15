/// Graph resolution bounded context
///
/// Domain models and services for building, rendering, and querying
/// transitive dependency graphs.
pub mod domain;
pub mod services;
