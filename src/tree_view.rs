//! View model for a fetched repository forest: initial collapse, per
//! directory expand/collapse toggling, flattening into visible rows, and
//! the plain-text outline used for clipboard export.

use crate::models::{FileNode, NodeKind};

const INDENT: &str = "    ";

/// One visible line of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    pub collapsed: Option<bool>,
}

/// Owns a forest for the lifetime of one displayed exploration. A new
/// exploration replaces the model wholesale; collapse state is never
/// carried over.
pub struct TreeViewModel {
    forest: Vec<FileNode>,
}

impl TreeViewModel {
    /// Takes ownership of a freshly fetched forest and applies the initial
    /// all-collapsed state exactly once, before the first render.
    pub fn new(mut forest: Vec<FileNode>) -> Self {
        apply_initial_collapse(&mut forest);
        TreeViewModel { forest }
    }

    pub fn forest(&self) -> &[FileNode] {
        &self.forest
    }

    /// Flips the collapse state of the directory at `path`. Files and
    /// unknown paths are left untouched. Returns whether anything changed,
    /// which is the caller's cue to re-render the whole forest.
    pub fn toggle(&mut self, path: &str) -> bool {
        fn toggle_in(nodes: &mut [FileNode], path: &str) -> bool {
            for node in nodes {
                if node.path == path {
                    if node.is_dir() {
                        let collapsed = node.collapsed.unwrap_or(false);
                        node.collapsed = Some(!collapsed);
                        return true;
                    }
                    return false;
                }
                if let Some(children) = node.children.as_mut() {
                    if toggle_in(children, path) {
                        return true;
                    }
                }
            }
            false
        }
        toggle_in(&mut self.forest, path)
    }

    /// Flattens the forest into the rows a renderer would draw, depth
    /// first. A collapsed directory contributes its own row but none of
    /// its descendants.
    pub fn rows(&self) -> Vec<TreeRow> {
        fn push_rows(nodes: &[FileNode], depth: usize, rows: &mut Vec<TreeRow>) {
            for node in nodes {
                rows.push(TreeRow {
                    depth,
                    name: node.name.clone(),
                    path: node.path.clone(),
                    kind: node.kind,
                    collapsed: node.collapsed,
                });
                if node.is_dir() && node.collapsed != Some(true) {
                    if let Some(children) = &node.children {
                        push_rows(children, depth + 1, rows);
                    }
                }
            }
        }
        let mut rows = Vec::new();
        push_rows(&self.forest, 0, &mut rows);
        rows
    }

    pub fn serialize(&self) -> String {
        serialize_structure(&self.forest)
    }
}

/// Recursively marks every directory collapsed. Files are untouched.
pub fn apply_initial_collapse(forest: &mut [FileNode]) {
    for node in forest {
        if node.is_dir() {
            node.collapsed = Some(true);
        }
        if let Some(children) = node.children.as_mut() {
            apply_initial_collapse(children);
        }
    }
}

/// Serializes a forest into an indented outline, one line per node.
/// Top-level nodes carry no connector; every deeper node is prefixed with
/// `├── `, or `└── ` when it is the last child of its parent. Collapse
/// state has no effect on the output.
pub fn serialize_structure(forest: &[FileNode]) -> String {
    let mut out = String::new();
    for (index, node) in forest.iter().enumerate() {
        serialize_node(node, 0, index + 1 == forest.len(), &mut out);
    }
    out
}

fn serialize_node(node: &FileNode, depth: usize, is_last: bool, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    if depth > 0 {
        out.push_str(if is_last { "└── " } else { "├── " });
    }
    out.push_str(&node.name);
    out.push('\n');
    if let Some(children) = &node.children {
        for (index, child) in children.iter().enumerate() {
            serialize_node(child, depth + 1, index + 1 == children.len(), out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // src/
    //   lib.rs
    //   nested/
    //     deep.rs
    // README.md
    fn sample_forest() -> Vec<FileNode> {
        vec![
            FileNode::dir(
                "src",
                "src",
                vec![
                    FileNode::file("lib.rs", "src/lib.rs"),
                    FileNode::dir(
                        "nested",
                        "src/nested",
                        vec![FileNode::file("deep.rs", "src/nested/deep.rs")],
                    ),
                ],
            ),
            FileNode::file("README.md", "README.md"),
        ]
    }

    fn count_nodes(nodes: &[FileNode]) -> usize {
        nodes
            .iter()
            .map(|node| 1 + node.children.as_deref().map_or(0, count_nodes))
            .sum()
    }

    #[test]
    fn initial_collapse_reaches_every_directory() {
        let model = TreeViewModel::new(sample_forest());

        let root = &model.forest()[0];
        assert_eq!(root.collapsed, Some(true));
        let nested = &root.children.as_ref().unwrap()[1];
        assert_eq!(nested.collapsed, Some(true));
        // Files stay as built, with no collapse state at all.
        assert_eq!(model.forest()[1].collapsed, None);
        assert_eq!(root.children.as_ref().unwrap()[0].collapsed, None);
    }

    #[test]
    fn toggle_expands_and_collapses_a_directory() {
        let mut model = TreeViewModel::new(sample_forest());

        assert!(model.toggle("src"));
        assert_eq!(model.forest()[0].collapsed, Some(false));
        assert!(model.toggle("src"));
        assert_eq!(model.forest()[0].collapsed, Some(true));
    }

    #[test]
    fn toggle_on_a_file_is_a_no_op() {
        let mut model = TreeViewModel::new(sample_forest());
        let before = model.rows();

        assert!(!model.toggle("README.md"));
        assert_eq!(model.forest()[1].collapsed, None);
        assert_eq!(model.rows(), before);
    }

    #[test]
    fn toggle_on_an_unknown_path_is_a_no_op() {
        let mut model = TreeViewModel::new(sample_forest());
        assert!(!model.toggle("does/not/exist"));
    }

    #[test]
    fn collapsed_directories_hide_their_descendants_in_rows() {
        let mut model = TreeViewModel::new(sample_forest());

        let rows = model.rows();
        assert_eq!(
            rows.iter().map(|row| row.name.as_str()).collect::<Vec<_>>(),
            ["src", "README.md"]
        );

        model.toggle("src");
        let rows = model.rows();
        assert_eq!(
            rows.iter().map(|row| row.name.as_str()).collect::<Vec<_>>(),
            ["src", "lib.rs", "nested", "README.md"]
        );
        assert_eq!(rows[1].depth, 1);

        model.toggle("src/nested");
        let rows = model.rows();
        assert_eq!(
            rows.iter().map(|row| row.name.as_str()).collect::<Vec<_>>(),
            ["src", "lib.rs", "nested", "deep.rs", "README.md"]
        );
        assert_eq!(rows[3].depth, 2);
    }

    #[test]
    fn serialize_matches_the_connector_layout() {
        let forest = vec![
            FileNode::dir(
                "A",
                "A",
                vec![FileNode::file("x", "A/x"), FileNode::file("y", "A/y")],
            ),
            FileNode::file("B", "B"),
        ];
        assert_eq!(
            serialize_structure(&forest),
            "A\n    ├── x\n    └── y\nB\n"
        );
    }

    #[test]
    fn serialize_emits_one_line_per_node() {
        let forest = sample_forest();
        let text = serialize_structure(&forest);
        assert_eq!(text.lines().count(), count_nodes(&forest));
    }

    #[test]
    fn serialize_ignores_collapse_state() {
        let expanded = serialize_structure(&sample_forest());

        let mut model = TreeViewModel::new(sample_forest());
        assert_eq!(model.serialize(), expanded);
        model.toggle("src");
        assert_eq!(model.serialize(), expanded);
    }

    #[test]
    fn serialize_indents_four_spaces_per_level() {
        let text = serialize_structure(&sample_forest());
        assert!(text.contains("\n    ├── lib.rs\n"));
        assert!(text.contains("\n        └── deep.rs\n"));
    }

    #[test]
    fn empty_forest_serializes_to_nothing() {
        assert_eq!(serialize_structure(&[]), "");
        assert!(TreeViewModel::new(Vec::new()).rows().is_empty());
    }
}
