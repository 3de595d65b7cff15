use crate::graph_resolution::domain::{PackageName, ResolvedGraph};

/// ResolveResponse - Internal response DTO from the dependency
/// resolution use case
///
/// The payload is what the user asked for and goes to stdout (or the
/// configured output file); everything else is structured data kept for
/// callers and tests.
#[derive(Debug, Clone)]
pub struct ResolveResponse {
    /// Rendered output sections joined by blank lines: direct listing,
    /// tree, reverse lookup. Empty when the executed stages produced
    /// nothing to print.
    pub payload: String,
    /// Deduplicated, filtered direct dependencies of the root in source
    /// order. Empty below stage 2.
    pub direct_dependencies: Vec<PackageName>,
    /// The resolved graph (only present from stage 3 on).
    pub graph: Option<ResolvedGraph>,
    /// Reverse lookup result, sorted.
    /// None = lookup not performed or not answerable from this source,
    /// Some(empty) = performed and nothing depends on the target.
    pub dependents: Option<Vec<PackageName>>,
}

impl ResolveResponse {
    pub fn new(
        payload: String,
        direct_dependencies: Vec<PackageName>,
        graph: Option<ResolvedGraph>,
        dependents: Option<Vec<PackageName>>,
    ) -> Self {
        Self {
            payload,
            direct_dependencies,
            graph,
            dependents,
        }
    }
}
