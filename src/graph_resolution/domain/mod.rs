pub mod dependency_graph;
pub mod package;

pub use dependency_graph::{AdjacencyMap, CyclePath, ResolvedGraph};
pub use package::PackageName;
