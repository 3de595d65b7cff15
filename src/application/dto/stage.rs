/// Pipeline stage selection
///
/// Stages are cumulative: each stage runs everything the previous one
/// runs and adds its own step. This enum belongs in the application
/// layer because both the CLI (inbound) and the use case need to agree
/// on what each number means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Load and validate the config file, echo it, stop.
    ConfigValidation = 1,
    /// Plus: list the root package's direct dependencies.
    DirectDependencies = 2,
    /// Plus: resolve the full graph and render the dependency tree.
    DependencyTree = 3,
    /// Plus: look up which packages depend on the reverse target.
    ReverseLookup = 4,
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Stage::ConfigValidation),
            "2" => Ok(Stage::DirectDependencies),
            "3" => Ok(Stage::DependencyTree),
            "4" => Ok(Stage::ReverseLookup),
            _ => Err(format!(
                "Invalid stage: {}. Please specify a number from 1 to 4",
                s
            )),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
