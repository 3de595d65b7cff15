use super::PackageName;
use std::collections::{BTreeMap, BTreeSet};

/// Adjacency map from a package to a set of package names.
///
/// BTreeMap and BTreeSet keep iteration lexicographic, so rendering and
/// graph comparisons are deterministic regardless of fetch order.
pub type AdjacencyMap = BTreeMap<PackageName, BTreeSet<PackageName>>;

/// A cycle recorded during a build: the ancestor chain starting at the
/// repeated package and closed by it, e.g. `[A, B, A]`.
pub type CyclePath = Vec<PackageName>;

/// ResolvedGraph aggregate holding the outcome of a single graph build.
///
/// The forward map carries the full transitive closure per package
/// (under the filter active during the build); the reverse map carries
/// direct edges only. Cycle-closing edges appear in neither map.
#[derive(Debug, Clone)]
pub struct ResolvedGraph {
    forward: AdjacencyMap,
    reverse: AdjacencyMap,
    cycles: Vec<CyclePath>,
}

impl ResolvedGraph {
    pub fn new(forward: AdjacencyMap, reverse: AdjacencyMap, cycles: Vec<CyclePath>) -> Self {
        Self {
            forward,
            reverse,
            cycles,
        }
    }

    pub fn forward(&self) -> &AdjacencyMap {
        &self.forward
    }

    pub fn reverse(&self) -> &AdjacencyMap {
        &self.reverse
    }

    pub fn cycles(&self) -> &[CyclePath] {
        &self.cycles
    }

    /// Transitive dependencies of a package discovered during the build.
    pub fn transitive_dependencies_of(&self, package: &PackageName) -> Option<&BTreeSet<PackageName>> {
        self.forward.get(package)
    }

    /// Packages that directly depend on the given package.
    pub fn reverse_dependencies_of(&self, package: &PackageName) -> Option<&BTreeSet<PackageName>> {
        self.reverse.get(package)
    }

    pub fn package_count(&self) -> usize {
        self.forward.len()
    }

    pub fn direct_edge_count(&self) -> usize {
        self.reverse.values().map(|dependents| dependents.len()).sum()
    }

    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PackageName {
        PackageName::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_resolved_graph_new() {
        let mut forward = AdjacencyMap::new();
        forward.insert(name("app"), [name("lib")].into_iter().collect());
        forward.insert(name("lib"), BTreeSet::new());

        let mut reverse = AdjacencyMap::new();
        reverse.insert(name("lib"), [name("app")].into_iter().collect());

        let graph = ResolvedGraph::new(forward, reverse, vec![]);

        assert_eq!(graph.package_count(), 2);
        assert_eq!(graph.direct_edge_count(), 1);
        assert_eq!(graph.cycle_count(), 0);
    }

    #[test]
    fn test_resolved_graph_empty() {
        let graph = ResolvedGraph::new(AdjacencyMap::new(), AdjacencyMap::new(), vec![]);

        assert_eq!(graph.package_count(), 0);
        assert_eq!(graph.direct_edge_count(), 0);
        assert_eq!(graph.cycle_count(), 0);
        assert!(graph.transitive_dependencies_of(&name("missing")).is_none());
        assert!(graph.reverse_dependencies_of(&name("missing")).is_none());
    }

    #[test]
    fn test_resolved_graph_accessors() {
        let mut forward = AdjacencyMap::new();
        forward.insert(
            name("app"),
            [name("lib"), name("util")].into_iter().collect(),
        );

        let mut reverse = AdjacencyMap::new();
        reverse.insert(name("lib"), [name("app")].into_iter().collect());

        let cycle = vec![name("x"), name("y"), name("x")];
        let graph = ResolvedGraph::new(forward, reverse, vec![cycle.clone()]);

        let deps = graph.transitive_dependencies_of(&name("app")).unwrap();
        assert!(deps.contains(&name("lib")));
        assert!(deps.contains(&name("util")));

        let dependents = graph.reverse_dependencies_of(&name("lib")).unwrap();
        assert!(dependents.contains(&name("app")));

        assert_eq!(graph.cycles(), &[cycle]);
    }
}
