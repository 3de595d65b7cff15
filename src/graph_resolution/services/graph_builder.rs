use crate::graph_resolution::domain::{AdjacencyMap, CyclePath, PackageName, ResolvedGraph};
use crate::graph_resolution::services::NameFilter;
use crate::ports::outbound::{DependencySource, ProgressReporter};
use crate::shared::Result;
use std::collections::{BTreeSet, HashSet};

/// GraphBuilder service for resolving the transitive dependency closure
///
/// Performs a depth-first traversal from a root package, fetching direct
/// dependencies through the injected source and accumulating two
/// adjacency maps at once: the forward map (per-package transitive
/// closure) and the reverse map (direct dependents).
///
/// Cycle detection uses the ancestor chain of the current recursion, not
/// the global visited set: the visited set only guarantees each package
/// is fetched at most once per build. Cycle-closing edges and filtered
/// packages are reported and dropped; they appear in neither map.
///
/// A builder instance is consumed by a single `build` call. Callers that
/// need another graph construct a fresh builder.
pub struct GraphBuilder<'a, S, R>
where
    S: DependencySource,
    R: ProgressReporter,
{
    source: &'a S,
    reporter: &'a R,
    filter: NameFilter,
    forward: AdjacencyMap,
    reverse: AdjacencyMap,
    visited: HashSet<PackageName>,
    cycles: Vec<CyclePath>,
    fetch_count: usize,
}

impl<'a, S, R> GraphBuilder<'a, S, R>
where
    S: DependencySource,
    R: ProgressReporter,
{
    pub fn new(source: &'a S, reporter: &'a R, filter: NameFilter) -> Self {
        Self {
            source,
            reporter,
            filter,
            forward: AdjacencyMap::new(),
            reverse: AdjacencyMap::new(),
            visited: HashSet::new(),
            cycles: Vec::new(),
            fetch_count: 0,
        }
    }

    /// Builds the resolved graph rooted at the given package.
    ///
    /// # Arguments
    /// * `root` - The package whose closure is resolved
    ///
    /// # Returns
    /// The ResolvedGraph with forward map, reverse map, and any cycles
    /// recorded along the way. A root excluded by the filter yields an
    /// empty graph.
    ///
    /// # Errors
    /// Propagates the first source failure; the build has no partial
    /// result in that case.
    pub fn build(mut self, root: &PackageName) -> Result<ResolvedGraph> {
        if self.filter.excludes(root) {
            self.reporter.report_error(&format!(
                "⚠️  Warning: Root package '{}' matches the exclusion filter '{}'. Nothing to resolve.",
                root,
                self.filter.substring()
            ));
            return Ok(ResolvedGraph::new(
                AdjacencyMap::new(),
                AdjacencyMap::new(),
                Vec::new(),
            ));
        }

        self.visited.insert(root.clone());
        self.resolve(root, &[])?;

        Ok(ResolvedGraph::new(self.forward, self.reverse, self.cycles))
    }

    /// Resolves one package: fetches its direct dependencies, records the
    /// surviving edges, recurses into unvisited children, and returns the
    /// package's transitive closure.
    ///
    /// `path` is the ancestor chain above `package`; a fetched dependency
    /// already on the chain (or equal to `package`) closes a cycle.
    fn resolve(&mut self, package: &PackageName, path: &[PackageName]) -> Result<BTreeSet<PackageName>> {
        self.fetch_count += 1;
        self.reporter.report_progress(
            self.fetch_count,
            &format!("Resolving dependencies of '{}'", package),
        );

        let fetched = self.source.direct_dependencies(package)?;

        let mut chain: Vec<PackageName> = path.to_vec();
        chain.push(package.clone());

        let mut direct: Vec<PackageName> = Vec::new();
        let mut seen: HashSet<PackageName> = HashSet::new();
        for dep in fetched {
            if !seen.insert(dep.clone()) {
                continue; // source listed the same dependency twice
            }
            if chain.contains(&dep) {
                self.record_cycle(&chain, &dep);
                continue;
            }
            if self.filter.excludes(&dep) {
                self.reporter.report(&format!(
                    "🚫 Excluding '{}' (name contains '{}')",
                    dep,
                    self.filter.substring()
                ));
                continue;
            }
            self.reverse
                .entry(dep.clone())
                .or_default()
                .insert(package.clone());
            direct.push(dep);
        }

        // Publish the direct set before expanding so that packages
        // reached again through another branch find a usable entry.
        let direct_set: BTreeSet<PackageName> = direct.iter().cloned().collect();
        self.forward.insert(package.clone(), direct_set.clone());

        let mut closure = direct_set;
        for dep in &direct {
            if self.visited.insert(dep.clone()) {
                let sub = self.resolve(dep, &chain)?;
                closure.extend(sub);
            } else if let Some(known) = self.forward.get(dep) {
                // Already resolved (or resolving) elsewhere: reuse the
                // entry by name instead of walking the subtree again.
                closure.extend(known.iter().cloned());
            }
        }

        self.forward.insert(package.clone(), closure.clone());
        Ok(closure)
    }

    /// Records a cycle closed by an edge from the end of `chain` back to
    /// `repeated`, and reports it. The stored path runs from the repeated
    /// package through the chain and closes with it, e.g. `[A, B, A]`.
    fn record_cycle(&mut self, chain: &[PackageName], repeated: &PackageName) {
        let Some(start) = chain.iter().position(|p| p == repeated) else {
            return;
        };
        let mut cycle: CyclePath = chain[start..].to_vec();
        cycle.push(repeated.clone());

        self.reporter.report_error(&format!(
            "⚠️  Warning: Dependency cycle detected: {} (edge skipped)",
            format_cycle(&cycle)
        ));
        self.cycles.push(cycle);
    }
}

fn format_cycle(cycle: &[PackageName]) -> String {
    cycle
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
