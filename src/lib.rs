//! depviz - transitive dependency visualizer
//!
//! This library resolves the transitive dependency closure of a package
//! and renders it as a tree, following hexagonal architecture and
//! Domain-Driven Design principles. Dependencies come either from a
//! PyPI-style package index over HTTP or from a local mapping file.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`graph_resolution`): Graph building, rendering,
//!   and reverse lookup
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use depviz::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let source = PackageIndexClient::new("https://pypi.org/pypi")?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ResolveDependenciesUseCase::new(source, progress_reporter, None);
//!
//! // Execute
//! let package = PackageName::new("requests".to_string())?;
//! let request = ResolveRequest::new(
//!     package.clone(),
//!     package,
//!     String::new(),
//!     RenderStyle::List,
//!     Stage::ReverseLookup,
//! );
//! let response = use_case.execute(request)?;
//! println!("{}", response.payload);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod graph_resolution;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, FlatFileSource, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::PackageIndexClient;
    pub use crate::application::dto::{ResolveRequest, ResolveResponse, Stage};
    pub use crate::application::use_cases::ResolveDependenciesUseCase;
    pub use crate::config::{load_config_from_path, Config};
    pub use crate::graph_resolution::domain::{AdjacencyMap, PackageName, ResolvedGraph};
    pub use crate::graph_resolution::services::{
        GraphBuilder, NameFilter, RenderStyle, ReverseLookup, TreeRenderer,
    };
    pub use crate::ports::outbound::{
        DependencyRecord, DependencyRecordScan, DependencySource, OutputPresenter,
        ProgressReporter,
    };
    pub use crate::shared::Result;
}
