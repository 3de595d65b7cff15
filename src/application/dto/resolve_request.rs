use crate::application::dto::Stage;
use crate::graph_resolution::domain::PackageName;
use crate::graph_resolution::services::RenderStyle;

/// ResolveRequest - Internal request DTO for the dependency resolution
/// use case
///
/// Carries everything derived from the config file and CLI arguments
/// that the use case needs. It is a plain value; the use case owns the
/// collaborators (source, reporter).
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Root package whose graph is resolved.
    pub package: PackageName,
    /// Target of the stage-4 reverse lookup.
    pub reverse_target: PackageName,
    /// Substring exclusion filter; empty disables filtering.
    pub filter_substring: String,
    /// Tree rendering style for the stage-3 payload.
    pub style: RenderStyle,
    /// Last pipeline stage to execute.
    pub stage: Stage,
}

impl ResolveRequest {
    pub fn new(
        package: PackageName,
        reverse_target: PackageName,
        filter_substring: String,
        style: RenderStyle,
        stage: Stage,
    ) -> Self {
        Self {
            package,
            reverse_target,
            filter_substring,
            style,
            stage,
        }
    }
}
