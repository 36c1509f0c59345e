//! Graph rendering for canonical search trees.
//!
//! Walks a [`CanonicalTree`] and declares one node per search node and one
//! labelled edge per parent/child pair into a [`GraphSink`]. The bundled sink
//! is [`DotBuilder`], whose DOT text can be laid out by Graphviz with
//! [`render_to_file`].
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and the DOT builder
//! - [`label`]: node and edge label text
//! - [`output`]: output formats and Graphviz invocation

pub mod dot;
pub mod label;
pub mod output;

use fitviz_core::node::{RED_ZONE, STACK_GROWTH};
use fitviz_core::{CanonicalTree, SearchNode};
use fitviz_error::Result;

pub use dot::DotBuilder;
pub use label::{edge_label, node_label};
pub use output::{OutputFormat, render_to_file};

/// Comment placed at the top of every rendered graph.
pub const DEFAULT_COMMENT: &str = "Faultspace Search";

/// Receiver of node and edge declarations.
pub trait GraphSink {
    fn declare_node(&mut self, id: &str, label: &str);
    fn declare_edge(&mut self, from: &str, to: &str, label: &str);
}

/// Options for graph rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// DOT graph name.
    pub graph_name: String,
    /// `//` comment written above the graph.
    pub comment: String,
    /// Graphviz `rankdir` attribute (e.g. `LR`); Graphviz default when unset.
    pub rankdir: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            graph_name: "G".to_string(),
            comment: DEFAULT_COMMENT.to_string(),
            rankdir: None,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Declare `node`, then for each child in order: the child's subtree, then
/// the edge into it.
pub fn render_tree_structure<S: GraphSink>(
    sink: &mut S,
    node: &SearchNode,
    needs_signature: bool,
) -> Result<()> {
    stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || {
        sink.declare_node(&node.id, &node_label(node, needs_signature));

        for child in &node.children {
            render_tree_structure(sink, child, needs_signature)?;
            sink.declare_edge(&node.id, &child.id, &edge_label(child)?);
        }
        Ok(())
    })
}

/// Render a canonical tree to DOT text.
pub fn render_tree(tree: &CanonicalTree, options: &RenderOptions) -> Result<String> {
    let mut dot = DotBuilder::with_comment(&options.graph_name, &options.comment);
    if let Some(rankdir) = &options.rankdir {
        dot.attr("rankdir", rankdir);
    }
    render_tree_structure(&mut dot, &tree.root, tree.needs_signature)?;
    Ok(dot.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitviz_core::{CanonicalizeOption, RawSearchNode, canonicalize};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
    }

    impl GraphSink for RecordingSink {
        fn declare_node(&mut self, id: &str, label: &str) {
            self.calls.push(format!("node {id} {label:?}"));
        }

        fn declare_edge(&mut self, from: &str, to: &str, label: &str) {
            self.calls.push(format!("edge {from}->{to} {label:?}"));
        }
    }

    fn sample_tree() -> RawSearchNode {
        RawSearchNode::from_value(json!({
            "index": 0,
            "node": "[]",
            "children": [
                {"index": 1, "node": "[uid=cart:GET /cart#0, mode=HTTP_ERROR(500)]", "children": [
                    {"index": 3, "node": "[uid=db:query#1, mode=HTTP_ERROR(503)]"}
                ]},
                {"index": 2, "node": "[uid=cart:GET /cart#0, mode=HTTP_ERROR(503)]", "children": [
                    {"index": 4, "node": "[uid=db:query#1, mode=HTTP_ERROR(500)]"}
                ]},
                {"index": 5, "node": "[uid=auth:POST /login#0, mode=HTTP_ERROR(500)]"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_declaration_order() {
        let tree = canonicalize(&sample_tree(), &CanonicalizeOption::default()).unwrap();
        let mut sink = RecordingSink::default();
        render_tree_structure(&mut sink, &tree.root, tree.needs_signature).unwrap();

        assert_eq!(
            sink.calls,
            vec![
                r#"node 0 "&empty;""#,
                r#"node 1,2 "cart""#,
                r#"node 3,4 "db#1""#,
                r#"edge 1,2->3,4 "3 - 4 (2)""#,
                r#"edge 0->1,2 "1 - 2 (2)""#,
                r#"node 5 "auth""#,
                r#"edge 0->5 "5""#,
            ]
        );
    }

    #[test]
    fn test_uncombined_labels_keep_modes() {
        let option = CanonicalizeOption::new().with_combine(false);
        let tree = canonicalize(&sample_tree(), &option).unwrap();
        let mut sink = RecordingSink::default();
        render_tree_structure(&mut sink, &tree.root, tree.needs_signature).unwrap();

        assert_eq!(sink.calls[1], r#"node 1 "cart\n500""#);
        assert_eq!(sink.calls[3], r#"edge 1->3 "3""#);
    }

    #[test]
    fn test_render_tree_dot() {
        let tree = canonicalize(&sample_tree(), &CanonicalizeOption::default()).unwrap();
        let options = RenderOptions {
            rankdir: Some("LR".to_string()),
            ..RenderOptions::default()
        };
        let dot = render_tree(&tree, &options).unwrap();

        let expected = "\
// Faultspace Search
digraph G {
  rankdir=\"LR\";
  \"0\" [label=\"&empty;\"];
  \"1,2\" [label=\"cart\"];
  \"3,4\" [label=\"db#1\"];
  \"1,2\" -> \"3,4\" [label=\"3 - 4 (2)\"];
  \"0\" -> \"1,2\" [label=\"1 - 2 (2)\"];
  \"5\" [label=\"auth\"];
  \"0\" -> \"5\" [label=\"5\"];
}
";
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_signature_shown_when_ambiguous() {
        let raw = RawSearchNode::from_value(json!({
            "index": 0,
            "node": "[]",
            "children": [
                {"index": 1, "node": "[uid=cart:GET /cart#0, mode=HTTP_ERROR(500)]"},
                {"index": 2, "node": "[uid=cart:POST /checkout#0, mode=HTTP_ERROR(500)]"}
            ]
        }))
        .unwrap();
        let tree = canonicalize(&raw, &CanonicalizeOption::default()).unwrap();
        assert!(tree.needs_signature);

        let mut sink = RecordingSink::default();
        render_tree_structure(&mut sink, &tree.root, tree.needs_signature).unwrap();
        assert_eq!(sink.calls[1], r#"node 1 "cart\n.../cart""#);
        assert_eq!(sink.calls[3], r#"node 2 "cart\n.../checkout""#);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let tree = canonicalize(&sample_tree(), &CanonicalizeOption::default()).unwrap();
        let first = render_tree(&tree, &RenderOptions::default()).unwrap();
        let second = render_tree(&tree, &RenderOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_very_deep_tree_renders() {
        let depth = 50_000;
        let mut raw = RawSearchNode {
            index: depth,
            node: "[uid=db:query#1, mode=HTTP_ERROR(500)]".to_string(),
            children: Vec::new(),
        };
        for index in (0..depth).rev() {
            raw = RawSearchNode {
                index,
                node: "[uid=cart:GET /cart#0, mode=HTTP_ERROR(503)]".to_string(),
                children: vec![raw],
            };
        }

        let tree = canonicalize(&raw, &CanonicalizeOption::default()).unwrap();
        let mut sink = RecordingSink::default();
        render_tree_structure(&mut sink, &tree.root, tree.needs_signature).unwrap();

        assert_eq!(sink.calls.len(), 2 * depth as usize + 1);
        assert_eq!(sink.calls[0], r#"node 0 "cart\n503""#);
        assert_eq!(sink.calls[depth as usize], format!(r#"node {depth} "db#1""#));
        assert_eq!(sink.calls.last().unwrap(), r#"edge 0->1 "1""#);
    }
}
