use crate::graph_resolution::domain::PackageName;
use crate::shared::Result;

/// DependencySource port for fetching the direct dependencies of a package
///
/// This port abstracts where dependency metadata comes from (a remote
/// package index over HTTP, or a local mapping file in test mode).
pub trait DependencySource {
    /// Returns the direct dependencies of a package in source order.
    ///
    /// An unknown package yields an empty list; sources cannot
    /// distinguish "unknown" from "has no dependencies".
    ///
    /// # Errors
    /// Returns an error only when the source itself is unavailable
    /// (network failure, unreadable file). Such errors abort the build.
    fn direct_dependencies(&self, package: &PackageName) -> Result<Vec<PackageName>>;

    /// Human-readable description of the source, used in diagnostics.
    fn describe(&self) -> String;
}

/// A raw dependency record: one package and its direct dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    pub package: PackageName,
    pub dependencies: Vec<PackageName>,
}

impl DependencyRecord {
    pub fn new(package: PackageName, dependencies: Vec<PackageName>) -> Self {
        Self {
            package,
            dependencies,
        }
    }
}

/// DependencyRecordScan port for sources that can enumerate every record
/// they hold
///
/// Only local sources implement this; a remote index cannot list all of
/// its packages. Reverse lookup falls back to scanning these records
/// when the cached graph has no entry for the target.
pub trait DependencyRecordScan {
    /// All known records, in source order.
    fn records(&self) -> &[DependencyRecord];
}
