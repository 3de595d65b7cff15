/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod resolve_request;
mod resolve_response;
mod stage;

pub use resolve_request::ResolveRequest;
pub use resolve_response::ResolveResponse;
pub use stage::Stage;
