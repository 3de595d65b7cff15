use crate::application::dto::{ResolveRequest, ResolveResponse, Stage};
use crate::graph_resolution::domain::{PackageName, ResolvedGraph};
use crate::graph_resolution::services::{
    GraphBuilder, NameFilter, RenderStyle, ReverseLookup, TreeRenderer,
};
use crate::ports::outbound::{DependencyRecord, DependencySource, ProgressReporter};
use crate::shared::Result;
use std::collections::HashSet;

/// ResolveDependenciesUseCase - Core use case for dependency resolution
///
/// Orchestrates the staged pipeline over the injected dependency source:
/// direct listing, full graph build with tree rendering, and reverse
/// lookup. The requested stage decides how far the pipeline runs; each
/// stage includes everything the previous one produced.
///
/// # Type Parameters
/// * `S` - DependencySource implementation
/// * `R` - ProgressReporter implementation
pub struct ResolveDependenciesUseCase<S, R> {
    dependency_source: S,
    progress_reporter: R,
    /// Raw records for the reverse-lookup fallback scan. Only sources
    /// that can enumerate their records provide them; None otherwise.
    records: Option<Vec<DependencyRecord>>,
}

impl<S, R> ResolveDependenciesUseCase<S, R>
where
    S: DependencySource,
    R: ProgressReporter,
{
    /// Creates a new ResolveDependenciesUseCase with injected dependencies
    pub fn new(
        dependency_source: S,
        progress_reporter: R,
        records: Option<Vec<DependencyRecord>>,
    ) -> Self {
        Self {
            dependency_source,
            progress_reporter,
            records,
        }
    }

    /// Executes the resolution pipeline up to the requested stage.
    ///
    /// # Arguments
    /// * `request` - Resolution request with the root package, filter,
    ///   render style, and stage
    ///
    /// # Returns
    /// ResolveResponse with the printable payload and the structured
    /// results of every stage that ran
    pub fn execute(&self, request: ResolveRequest) -> Result<ResolveResponse> {
        // Stage 1 stops after config validation, which the caller has
        // already done by constructing the request.
        if request.stage < Stage::DirectDependencies {
            self.progress_reporter
                .report_completion("✅ Configuration validated. No issues found.");
            return Ok(ResolveResponse::new(String::new(), Vec::new(), None, None));
        }

        let filter = NameFilter::new(request.filter_substring.clone());
        if filter.excludes(&request.package) {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Root package '{}' matches the exclusion filter '{}'. Nothing to resolve.",
                request.package,
                filter.substring()
            ));
            self.progress_reporter
                .report_completion("✅ Nothing to resolve: the root package is excluded.");
            return Ok(ResolveResponse::new(String::new(), Vec::new(), None, None));
        }

        // Step 1: list the root's direct dependencies
        let direct_dependencies = self.list_direct_dependencies(&request.package, &filter)?;
        let mut sections = vec![direct_section(&request.package, &direct_dependencies)];

        if request.stage < Stage::DependencyTree {
            self.progress_reporter.report_completion(&format!(
                "✅ Direct dependency listing complete: {} package(s)",
                direct_dependencies.len()
            ));
            return Ok(ResolveResponse::new(
                sections.join("\n\n"),
                direct_dependencies,
                None,
                None,
            ));
        }

        // Step 2: resolve the full graph and render the tree
        let graph = self.resolve_graph(&request.package, &filter)?;
        sections.push(render_tree(&request.package, &graph, request.style));

        if request.stage < Stage::ReverseLookup {
            self.progress_reporter.report_completion(&format!(
                "✅ Dependency graph resolved: {} package(s)",
                graph.package_count()
            ));
            return Ok(ResolveResponse::new(
                sections.join("\n\n"),
                direct_dependencies,
                Some(graph),
                None,
            ));
        }

        // Step 3: reverse lookup
        let dependents = self.lookup_dependents(&request.reverse_target, &graph);
        if let Some(dependents) = &dependents {
            sections.push(reverse_section(&request.reverse_target, dependents));
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Dependency resolution complete: {} package(s)",
            graph.package_count()
        ));
        Ok(ResolveResponse::new(
            sections.join("\n\n"),
            direct_dependencies,
            Some(graph),
            dependents,
        ))
    }

    /// Fetches the root's direct dependencies and returns them
    /// deduplicated and filtered, in source order.
    fn list_direct_dependencies(
        &self,
        root: &PackageName,
        filter: &NameFilter,
    ) -> Result<Vec<PackageName>> {
        self.progress_reporter.report(&format!(
            "📖 Reading direct dependencies of '{}' from {}",
            root,
            self.dependency_source.describe()
        ));

        let fetched = self.dependency_source.direct_dependencies(root)?;

        let mut direct = Vec::new();
        let mut seen = HashSet::new();
        for dep in fetched {
            if !seen.insert(dep.clone()) {
                continue;
            }
            if filter.excludes(&dep) {
                self.progress_reporter.report(&format!(
                    "🚫 Excluding '{}' (name contains '{}')",
                    dep,
                    filter.substring()
                ));
                continue;
            }
            direct.push(dep);
        }

        self.progress_reporter.report(&format!(
            "✅ Detected {} direct dependency(ies)",
            direct.len()
        ));

        Ok(direct)
    }

    /// Runs a fresh graph build from the root and reports its size.
    fn resolve_graph(&self, root: &PackageName, filter: &NameFilter) -> Result<ResolvedGraph> {
        self.progress_reporter
            .report("📊 Resolving the transitive dependency graph...");

        let builder = GraphBuilder::new(
            &self.dependency_source,
            &self.progress_reporter,
            filter.clone(),
        );
        let graph = builder.build(root)?;

        self.progress_reporter.report(&format!(
            "   - Packages resolved: {}",
            graph.package_count()
        ));
        self.progress_reporter.report(&format!(
            "   - Direct edges recorded: {}",
            graph.direct_edge_count()
        ));
        if graph.cycle_count() > 0 {
            self.progress_reporter.report(&format!(
                "   - Cycles detected: {}",
                graph.cycle_count()
            ));
        }

        Ok(graph)
    }

    /// Answers "who depends on the target", preferring the built graph,
    /// then the record scan. None when neither can answer.
    fn lookup_dependents(
        &self,
        target: &PackageName,
        graph: &ResolvedGraph,
    ) -> Option<Vec<PackageName>> {
        self.progress_reporter.report(&format!(
            "🔍 Looking up packages that depend on '{}'...",
            target
        ));

        if let Some(dependents) = ReverseLookup::from_graph(target, graph) {
            return Some(dependents.into_iter().collect());
        }

        if let Some(records) = &self.records {
            return Some(
                ReverseLookup::scan_records(target, records)
                    .into_iter()
                    .collect(),
            );
        }

        if graph.forward().contains_key(target) {
            // The build covered the target and recorded no edge into it:
            // nothing in the resolved closure depends on it.
            return Some(Vec::new());
        }

        self.progress_reporter.report_error(&format!(
            "⚠️  Warning: Reverse lookup for '{}' is not available: the package is outside \
             the resolved graph and this source cannot enumerate its records.",
            target
        ));
        None
    }
}

/// Payload section listing the root's direct dependencies.
fn direct_section(root: &PackageName, direct: &[PackageName]) -> String {
    if direct.is_empty() {
        return format!("Direct dependencies of '{}': (none)", root);
    }
    let mut lines = vec![format!("Direct dependencies of '{}':", root)];
    for dep in direct {
        lines.push(format!("  - {}", dep));
    }
    lines.join("\n")
}

/// Payload section with the rendered dependency tree.
fn render_tree(root: &PackageName, graph: &ResolvedGraph, style: RenderStyle) -> String {
    TreeRenderer::render(root, graph.forward(), style).join("\n")
}

/// Payload section answering the reverse lookup.
fn reverse_section(target: &PackageName, dependents: &[PackageName]) -> String {
    if dependents.is_empty() {
        return format!("Packages that depend on '{}': (none)", target);
    }
    let joined = dependents
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Packages that depend on '{}': {}", target, joined)
}

#[cfg(test)]
mod tests;
