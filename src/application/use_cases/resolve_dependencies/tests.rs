use super::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// Mock implementations for testing

struct MockSource {
    map: HashMap<String, Vec<String>>,
    calls: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

impl MockSource {
    fn new(entries: &[(&str, &[&str])]) -> Self {
        let mut map = HashMap::new();
        for (package, deps) in entries {
            map.insert(
                package.to_string(),
                deps.iter().map(|d| d.to_string()).collect(),
            );
        }
        Self {
            map,
            calls: Rc::new(RefCell::new(Vec::new())),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            map: HashMap::new(),
            calls: Rc::new(RefCell::new(Vec::new())),
            fail: true,
        }
    }

    fn call_log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.calls)
    }
}

impl DependencySource for MockSource {
    fn direct_dependencies(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        self.calls.borrow_mut().push(package.to_string());
        if self.fail {
            anyhow::bail!("connection refused");
        }
        let deps = self.map.get(package.as_str()).cloned().unwrap_or_default();
        deps.into_iter().map(PackageName::new).collect()
    }

    fn describe(&self) -> String {
        "mock source".to_string()
    }
}

#[derive(Clone)]
struct CapturingReporter {
    messages: Rc<RefCell<Vec<String>>>,
}

impl CapturingReporter {
    fn new() -> Self {
        Self {
            messages: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    fn contains(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.contains(needle))
    }
}

impl ProgressReporter for CapturingReporter {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_progress(&self, _current: usize, _message: &str) {}

    fn report_error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

fn name(s: &str) -> PackageName {
    PackageName::new(s.to_string()).unwrap()
}

fn request(package: &str, stage: Stage) -> ResolveRequest {
    ResolveRequest::new(
        name(package),
        name(package),
        String::new(),
        RenderStyle::List,
        stage,
    )
}

#[test]
fn test_execute_stage_one_touches_nothing() {
    let source = MockSource::new(&[("a", &["b"])]);
    let calls = source.call_log();
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter.clone(), None);

    let response = use_case
        .execute(request("a", Stage::ConfigValidation))
        .unwrap();

    assert!(response.payload.is_empty());
    assert!(response.direct_dependencies.is_empty());
    assert!(response.graph.is_none());
    assert!(response.dependents.is_none());
    assert!(calls.borrow().is_empty());
    assert!(reporter.contains("Configuration validated"));
}

#[test]
fn test_execute_stage_two_lists_direct_dependencies() {
    let source = MockSource::new(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
    let calls = source.call_log();
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter.clone(), None);

    let response = use_case
        .execute(request("a", Stage::DirectDependencies))
        .unwrap();

    assert_eq!(
        response.payload,
        "Direct dependencies of 'a':\n  - b\n  - c"
    );
    assert_eq!(response.direct_dependencies, vec![name("b"), name("c")]);
    assert!(response.graph.is_none());
    // Only the root is fetched at this stage.
    assert_eq!(*calls.borrow(), vec!["a".to_string()]);
    assert!(reporter.contains("Direct dependency listing complete: 2 package(s)"));
}

#[test]
fn test_execute_stage_two_deduplicates_and_filters() {
    let source = MockSource::new(&[("app", &["lib", "lib", "x-ray", "util"])]);
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter.clone(), None);

    let mut req = request("app", Stage::DirectDependencies);
    req.filter_substring = "x".to_string();
    let response = use_case.execute(req).unwrap();

    assert_eq!(
        response.direct_dependencies,
        vec![name("lib"), name("util")]
    );
    assert!(!response.payload.contains("x-ray"));
    assert!(reporter.contains("🚫 Excluding 'x-ray'"));
}

#[test]
fn test_execute_stage_three_renders_list_tree() {
    let source = MockSource::new(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter.clone(), None);

    let response = use_case
        .execute(request("a", Stage::DependencyTree))
        .unwrap();

    assert_eq!(
        response.payload,
        "Direct dependencies of 'a':\n  - b\n  - c\
         \n\n\
         a\n  └── b\n    └── c\n  └── c"
    );

    let graph = response.graph.unwrap();
    assert_eq!(graph.package_count(), 3);
    let expected: std::collections::BTreeSet<PackageName> =
        [name("b"), name("c")].into_iter().collect();
    assert_eq!(graph.transitive_dependencies_of(&name("a")), Some(&expected));
    assert!(reporter.contains("Dependency graph resolved: 3 package(s)"));
}

#[test]
fn test_execute_stage_three_ascii_style() {
    let source = MockSource::new(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter, None);

    let mut req = request("a", Stage::DependencyTree);
    req.style = RenderStyle::Ascii;
    let response = use_case.execute(req).unwrap();

    assert!(response
        .payload
        .ends_with("a\n├── b\n│   └── c\n└── c"));
}

#[test]
fn test_execute_stage_four_appends_reverse_section() {
    let source = MockSource::new(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter, None);

    let mut req = request("a", Stage::ReverseLookup);
    req.reverse_target = name("c");
    let response = use_case.execute(req).unwrap();

    assert!(response
        .payload
        .ends_with("Packages that depend on 'c': a, b"));
    assert_eq!(response.dependents, Some(vec![name("a"), name("b")]));
}

#[test]
fn test_execute_stage_four_scans_records_for_unseen_target() {
    let source = MockSource::new(&[("a", &["b"]), ("b", &[])]);
    let reporter = CapturingReporter::new();
    let records = vec![
        DependencyRecord::new(name("consumer"), vec![name("a")]),
        DependencyRecord::new(name("bystander"), vec![name("b")]),
    ];
    let use_case = ResolveDependenciesUseCase::new(source, reporter, Some(records));

    // Nothing inside the built graph depends on the root, so the lookup
    // falls through to the record scan.
    let response = use_case.execute(request("a", Stage::ReverseLookup)).unwrap();

    assert_eq!(response.dependents, Some(vec![name("consumer")]));
    assert!(response
        .payload
        .ends_with("Packages that depend on 'a': consumer"));
}

#[test]
fn test_execute_stage_four_root_with_no_records_reports_none() {
    let source = MockSource::new(&[("a", &["b"]), ("b", &[])]);
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter, None);

    let response = use_case.execute(request("a", Stage::ReverseLookup)).unwrap();

    // The root is in the graph and nothing points at it.
    assert_eq!(response.dependents, Some(vec![]));
    assert!(response
        .payload
        .ends_with("Packages that depend on 'a': (none)"));
}

#[test]
fn test_execute_stage_four_unanswerable_target() {
    let source = MockSource::new(&[("a", &["b"]), ("b", &[])]);
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter.clone(), None);

    let mut req = request("a", Stage::ReverseLookup);
    req.reverse_target = name("ghost");
    let response = use_case.execute(req).unwrap();

    assert!(response.dependents.is_none());
    assert!(!response.payload.contains("Packages that depend on"));
    assert!(reporter.contains("Reverse lookup for 'ghost' is not available"));
}

#[test]
fn test_execute_root_excluded_by_filter() {
    let source = MockSource::new(&[("test-app", &["lib"])]);
    let calls = source.call_log();
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter.clone(), None);

    let mut req = request("test-app", Stage::ReverseLookup);
    req.filter_substring = "test".to_string();
    let response = use_case.execute(req).unwrap();

    assert!(response.payload.is_empty());
    assert!(response.graph.is_none());
    assert!(calls.borrow().is_empty());
    assert!(reporter.contains("Root package 'test-app' matches the exclusion filter"));
}

#[test]
fn test_execute_source_failure_aborts() {
    let source = MockSource::failing();
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter, None);

    let result = use_case.execute(request("a", Stage::DirectDependencies));

    assert!(result.is_err());
    let err = format!("{}", result.unwrap_err());
    assert!(err.contains("connection refused"));
}

#[test]
fn test_execute_fetches_each_package_once_per_build() {
    let source = MockSource::new(&[
        ("a", &["b", "c"]),
        ("b", &["d"]),
        ("c", &["d"]),
        ("d", &[]),
    ]);
    let calls = source.call_log();
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter, None);

    use_case.execute(request("a", Stage::DependencyTree)).unwrap();

    let log = calls.borrow();
    let count = |p: &str| log.iter().filter(|c| c.as_str() == p).count();
    // The root is fetched twice: once for the direct listing, once by
    // the graph build. Every other package exactly once.
    assert_eq!(count("a"), 2);
    assert_eq!(count("b"), 1);
    assert_eq!(count("c"), 1);
    assert_eq!(count("d"), 1);
}

#[test]
fn test_execute_reports_cycles() {
    let source = MockSource::new(&[("a", &["b"]), ("b", &["a"])]);
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter.clone(), None);

    let response = use_case
        .execute(request("a", Stage::DependencyTree))
        .unwrap();

    let graph = response.graph.unwrap();
    assert_eq!(graph.cycle_count(), 1);
    assert!(reporter.contains("Dependency cycle detected"));
    assert!(reporter.contains("Cycles detected: 1"));
}

// ===== Tests for extracted methods =====

#[test]
fn test_list_direct_dependencies_applies_filter() {
    let source = MockSource::new(&[("app", &["lib", "dev-tools", "util"])]);
    let reporter = CapturingReporter::new();
    let use_case = ResolveDependenciesUseCase::new(source, reporter, None);

    let direct = use_case
        .list_direct_dependencies(&name("app"), &NameFilter::new("dev"))
        .unwrap();

    assert_eq!(direct, vec![name("lib"), name("util")]);
}

#[test]
fn test_lookup_dependents_prefers_graph_entry() {
    let source = MockSource::new(&[("app", &["lib"]), ("lib", &[])]);
    let reporter = CapturingReporter::new();
    // The record scan would also find "other", but the graph entry for
    // "lib" answers first.
    let records = vec![
        DependencyRecord::new(name("app"), vec![name("lib")]),
        DependencyRecord::new(name("other"), vec![name("lib")]),
    ];
    let use_case = ResolveDependenciesUseCase::new(source, reporter, Some(records));

    let graph = use_case
        .resolve_graph(&name("app"), &NameFilter::disabled())
        .unwrap();
    let dependents = use_case.lookup_dependents(&name("lib"), &graph);

    assert_eq!(dependents, Some(vec![name("app")]));
}

#[test]
fn test_direct_section_with_no_dependencies() {
    assert_eq!(
        direct_section(&name("solo"), &[]),
        "Direct dependencies of 'solo': (none)"
    );
}

#[test]
fn test_reverse_section_formats() {
    assert_eq!(
        reverse_section(&name("lib"), &[name("a"), name("b")]),
        "Packages that depend on 'lib': a, b"
    );
    assert_eq!(
        reverse_section(&name("lib"), &[]),
        "Packages that depend on 'lib': (none)"
    );
}

#[test]
fn test_capturing_reporter_records_all_kinds() {
    let reporter = CapturingReporter::new();
    reporter.report("one");
    reporter.report_error("two");
    reporter.report_completion("three");
    assert_eq!(reporter.messages(), vec!["one", "two", "three"]);
}
