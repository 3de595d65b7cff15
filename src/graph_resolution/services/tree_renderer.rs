use crate::graph_resolution::domain::{AdjacencyMap, PackageName};
use std::collections::HashSet;

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Indentation step per tree level in list style.
const LIST_INDENT_STEP: usize = 2;

/// Rendering style for dependency trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// Indented list: every child sits behind a `└── ` connector,
    /// indented two spaces per level.
    List,
    /// Box-drawing tree with `├── `/`└── ` connectors and `│` rails.
    Ascii,
}

/// TreeRenderer service for turning an adjacency map into text lines
///
/// A pure function over the map: no I/O, no mutation. Children are
/// emitted in the map's set order, which is lexicographic, so output is
/// deterministic regardless of the order the source listed dependencies.
///
/// Each recursion branch carries its own copy of the packages already on
/// the downward path; a repeated package is rendered as an annotated
/// leaf instead of being expanded. That guarantees termination even if
/// the map itself contains a cycle, which a built graph never does.
pub struct TreeRenderer;

impl TreeRenderer {
    /// Renders the tree rooted at `root` as a list of lines.
    ///
    /// # Arguments
    /// * `root` - Package at the top of the tree
    /// * `map` - Adjacency map to render (package -> children)
    /// * `style` - List or ascii connectors
    pub fn render(root: &PackageName, map: &AdjacencyMap, style: RenderStyle) -> Vec<String> {
        let mut lines = vec![root.to_string()];
        let mut on_path = HashSet::new();
        on_path.insert(root.clone());

        match style {
            RenderStyle::List => {
                Self::render_list(root, map, LIST_INDENT_STEP, &on_path, &mut lines);
            }
            RenderStyle::Ascii => {
                let mut segments = Vec::new();
                Self::render_ascii(root, map, &mut segments, &on_path, &mut lines);
            }
        }

        lines
    }

    fn render_list(
        node: &PackageName,
        map: &AdjacencyMap,
        depth: usize,
        on_path: &HashSet<PackageName>,
        lines: &mut Vec<String>,
    ) {
        let Some(children) = map.get(node) else {
            return;
        };

        for child in children {
            let indent = " ".repeat(depth);
            if on_path.contains(child) {
                lines.push(format!("{}{}{} (already shown)", indent, CORNER, child));
                continue;
            }
            lines.push(format!("{}{}{}", indent, CORNER, child));

            let mut next_path = on_path.clone();
            next_path.insert(child.clone());
            Self::render_list(child, map, depth + LIST_INDENT_STEP, &next_path, lines);
        }
    }

    fn render_ascii(
        node: &PackageName,
        map: &AdjacencyMap,
        segments: &mut Vec<bool>,
        on_path: &HashSet<PackageName>,
        lines: &mut Vec<String>,
    ) {
        let Some(children) = map.get(node) else {
            return;
        };

        let count = children.len();
        for (index, child) in children.iter().enumerate() {
            let is_last = index + 1 == count;

            let mut prefix = String::new();
            for &has_more_siblings in segments.iter() {
                prefix.push_str(if has_more_siblings { PIPE } else { SPACE });
            }
            let connector = if is_last { CORNER } else { BRANCH };

            if on_path.contains(child) {
                lines.push(format!("{}{}{} (cycle)", prefix, connector, child));
                continue;
            }
            lines.push(format!("{}{}{}", prefix, connector, child));

            segments.push(!is_last);
            let mut next_path = on_path.clone();
            next_path.insert(child.clone());
            Self::render_ascii(child, map, segments, &next_path, lines);
            segments.pop();
        }
    }
}
