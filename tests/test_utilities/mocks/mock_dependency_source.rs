use depviz::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock DependencySource backed by an in-memory map, recording every
/// fetch it serves
#[derive(Default)]
pub struct MockDependencySource {
    pub map: HashMap<String, Vec<String>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub should_fail: bool,
}

impl MockDependencySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: &str, dependencies: &[&str]) -> Self {
        self.map.insert(
            package.to_string(),
            dependencies.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Handle onto the fetch log, valid after the source is moved into
    /// a use case.
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    /// The map as raw records, for reverse-lookup scan tests.
    pub fn as_records(&self) -> Vec<DependencyRecord> {
        self.map
            .iter()
            .map(|(package, dependencies)| {
                DependencyRecord::new(
                    PackageName::new(package.clone()).unwrap(),
                    dependencies
                        .iter()
                        .map(|d| PackageName::new(d.clone()).unwrap())
                        .collect(),
                )
            })
            .collect()
    }
}

impl DependencySource for MockDependencySource {
    fn direct_dependencies(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        self.calls.lock().unwrap().push(package.to_string());
        if self.should_fail {
            anyhow::bail!("Mock dependency source failure");
        }
        self.map
            .get(package.as_str())
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(PackageName::new)
            .collect()
    }

    fn describe(&self) -> String {
        "mock dependency source".to_string()
    }
}

/// Counts how many times a package was fetched, given a log handle.
pub fn fetch_count(log: &Arc<Mutex<Vec<String>>>, package: &str) -> usize {
    log.lock()
        .unwrap()
        .iter()
        .filter(|p| p.as_str() == package)
        .count()
}
