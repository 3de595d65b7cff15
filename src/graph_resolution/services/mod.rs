mod graph_builder;
mod name_filter;
mod reverse_lookup;
mod tree_renderer;

pub use graph_builder::GraphBuilder;
pub use name_filter::NameFilter;
pub use reverse_lookup::ReverseLookup;
pub use tree_renderer::{RenderStyle, TreeRenderer};
