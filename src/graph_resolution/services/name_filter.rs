use crate::graph_resolution::domain::PackageName;

/// NameFilter - excludes packages whose name contains a configured substring
///
/// Matching is case-sensitive containment. An empty substring disables
/// filtering entirely. The filter applies uniformly to every package the
/// builder encounters, including the root itself.
#[derive(Debug, Clone)]
pub struct NameFilter {
    substring: String,
}

impl NameFilter {
    pub fn new(substring: impl Into<String>) -> Self {
        Self {
            substring: substring.into(),
        }
    }

    /// A filter that excludes nothing.
    pub fn disabled() -> Self {
        Self::new("")
    }

    /// Checks whether a package must be dropped from the graph.
    pub fn excludes(&self, package: &PackageName) -> bool {
        !self.substring.is_empty() && package.as_str().contains(&self.substring)
    }

    pub fn is_active(&self) -> bool {
        !self.substring.is_empty()
    }

    pub fn substring(&self) -> &str {
        &self.substring
    }
}
