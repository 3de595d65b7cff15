use crate::graph_resolution::domain::{PackageName, ResolvedGraph};
use crate::ports::outbound::DependencyRecord;
use std::collections::BTreeSet;

/// ReverseLookup service answering "which packages depend on X"
///
/// Two strategies, tried in order by the caller:
/// 1. the reverse map of an already built graph (covers every package
///    discovered from the root),
/// 2. a linear scan over raw records, for targets the build never
///    reached. Only sources that can enumerate their records support
///    the scan; a remote index cannot.
pub struct ReverseLookup;

impl ReverseLookup {
    /// Direct dependents of `target` recorded in the built graph, or
    /// None when the build never recorded an edge into `target`.
    pub fn from_graph(
        target: &PackageName,
        graph: &ResolvedGraph,
    ) -> Option<BTreeSet<PackageName>> {
        graph.reverse_dependencies_of(target).cloned()
    }

    /// Scans raw records for packages listing `target` as a direct
    /// dependency. One pass, in whatever order the source stores them;
    /// the result set itself is sorted.
    pub fn scan_records(
        target: &PackageName,
        records: &[DependencyRecord],
    ) -> BTreeSet<PackageName> {
        let mut dependents = BTreeSet::new();
        for record in records {
            if record.dependencies.contains(target) {
                dependents.insert(record.package.clone());
            }
        }
        dependents
    }
}
