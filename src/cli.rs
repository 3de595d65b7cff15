use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::Stage;

/// Visualize the transitive dependency graph of a package
#[derive(Parser, Debug)]
#[command(name = "depviz")]
#[command(version = "0.1.0")]
#[command(about = "Visualize the transitive dependency graph of a package", long_about = None)]
pub struct Args {
    /// Path to the config file (one key;value pair per line)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Pipeline stage to stop after: 1=config check, 2=direct
    /// dependencies, 3=dependency tree, 4=reverse lookup
    #[arg(short, long, default_value = "4")]
    pub stage: Stage,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
