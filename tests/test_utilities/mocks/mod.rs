/// Mock implementations for testing
mod mock_dependency_source;
mod mock_progress_reporter;

pub use mock_dependency_source::{fetch_count, MockDependencySource};
pub use mock_progress_reporter::MockProgressReporter;
