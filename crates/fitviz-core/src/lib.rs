//! Search tree canonicalization for fitviz.
//!
//! Raw search trees contain many sibling branches that visit the same
//! endpoint with the same outcome. This crate turns the raw document into a
//! smaller canonical tree ready for drawing:
//!
//! raw JSON → [`builder`] (uses [`identifier`] and [`signature`]) → full tree
//! → [`analyze`] (one global verdict) → [`combine`] → [`CanonicalTree`]

pub mod analyze;
pub mod builder;
pub mod combine;
pub mod identifier;
pub mod node;
pub mod signature;

use std::time::Instant;

use tracing::{debug, info};

pub use analyze::needs_signature;
pub use builder::{RawSearchNode, build_tree};
pub use combine::combine_tree;
pub use fitviz_error::{Error, ErrorKind, Result};
pub use identifier::{EMPTY_DISPLAY_NAME, ParsedIdentifier, parse_identifier};
pub use node::SearchNode;
pub use signature::simplify_signature;

/// Options for [`canonicalize`].
#[derive(Debug, Clone, Copy)]
pub struct CanonicalizeOption {
    /// Merge equivalent sibling subtrees. When false the built tree is kept
    /// as-is.
    pub combine: bool,
}

impl Default for CanonicalizeOption {
    fn default() -> Self {
        Self { combine: true }
    }
}

impl CanonicalizeOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_combine(mut self, combine: bool) -> Self {
        self.combine = combine;
        self
    }
}

/// The tree handed to the renderer, together with the disambiguation
/// verdict computed on the full, uncombined tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTree {
    pub root: SearchNode,
    pub needs_signature: bool,
}

/// Build, analyze and (optionally) combine a raw search tree.
pub fn canonicalize(raw: &RawSearchNode, option: &CanonicalizeOption) -> Result<CanonicalTree> {
    let start = Instant::now();
    let root = build_tree(raw)?;
    let built_nodes = root.node_count();

    let needs_signature = needs_signature(&root.flatten());
    debug!(built_nodes, needs_signature, "search tree built");

    let root = if option.combine {
        let combined = combine_tree(&root, needs_signature);
        info!(
            built_nodes,
            combined_nodes = combined.node_count(),
            "search tree combined"
        );
        combined
    } else {
        root
    };

    info!(
        "Canonicalization: {:.3}s",
        start.elapsed().as_secs_f64()
    );

    Ok(CanonicalTree {
        root,
        needs_signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawSearchNode {
        RawSearchNode::from_value(value).unwrap()
    }

    fn sorted(mut v: Vec<i64>) -> Vec<i64> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_merge_scenario() {
        let tree = raw(json!({
            "index": 0,
            "node": "[]",
            "children": [
                {"index": 1, "node": "[uid=A:s1#0, mode=HTTP_ERROR(500)]"},
                {"index": 2, "node": "[uid=A:s1#0, mode=HTTP_ERROR(503)]"}
            ]
        }));

        let canonical = canonicalize(&tree, &CanonicalizeOption::default()).unwrap();
        assert!(!canonical.needs_signature);
        assert_eq!(canonical.root.children.len(), 1);

        let merged = &canonical.root.children[0];
        assert_eq!(merged.id, "1,2");
        assert_eq!(merged.index, 1);
        assert_eq!(merged.mode, "");
        assert_eq!(merged.display_name, "A");
        assert_eq!(merged.signature, "s1");
        assert!(merged.children.is_empty());
    }

    #[test]
    fn test_without_combine_keeps_tree() {
        let tree = raw(json!({
            "index": 0,
            "node": "[]",
            "children": [
                {"index": 1, "node": "[uid=A:s1#0, mode=HTTP_ERROR(500)]"},
                {"index": 2, "node": "[uid=A:s1#0, mode=HTTP_ERROR(503)]"}
            ]
        }));

        let option = CanonicalizeOption::new().with_combine(false);
        let canonical = canonicalize(&tree, &option).unwrap();
        assert_eq!(canonical.root, build_tree(&tree).unwrap());
        assert_eq!(canonical.root.children[1].mode, "503");
    }

    #[test]
    fn test_verdict_uses_deep_nodes() {
        let tree = raw(json!({
            "index": 0,
            "node": "[]",
            "children": [
                {"index": 1, "node": "[uid=cart:GET /cart#0, mode=HTTP_ERROR(500)]",
                 "children": [{"index": 3, "node": "[uid=cart:POST /checkout#0, mode=HTTP_ERROR(500)]"}]},
                {"index": 2, "node": "[uid=cart:GET /cart#0, mode=HTTP_ERROR(503)]"}
            ]
        }));

        let canonical = canonicalize(&tree, &CanonicalizeOption::default()).unwrap();
        assert!(canonical.needs_signature);
        assert_eq!(canonical.root.children[0].id, "1,2");
        assert_eq!(canonical.root.children[0].children[0].signature, ".../checkout");
    }

    #[test]
    fn test_leaf_indices_preserved_through_deep_merges() {
        let tree = raw(json!({
            "index": 0,
            "node": "[]",
            "children": [
                {"index": 1, "node": "[uid=a:x#0, mode=HTTP_ERROR(500)]", "children": [
                    {"index": 4, "node": "[uid=b:y#0, mode=HTTP_ERROR(500)]", "children": [
                        {"index": 8, "node": "[uid=c:z#1, mode=HTTP_ERROR(500)]"}
                    ]},
                    {"index": 5, "node": "[uid=b:y#0, mode=HTTP_ERROR(502)]"}
                ]},
                {"index": 2, "node": "[uid=a:x#0, mode=HTTP_ERROR(503)]", "children": [
                    {"index": 6, "node": "[uid=b:y#0, mode=HTTP_ERROR(500)]", "children": [
                        {"index": 9, "node": "[uid=c:z#1, mode=HTTP_ERROR(500)]"}
                    ]}
                ]},
                {"index": 3, "node": "[uid=d:w#0, mode=HTTP_ERROR(500)]"}
            ]
        }));

        let canonical = canonicalize(&tree, &CanonicalizeOption::default()).unwrap();
        assert_eq!(
            sorted(canonical.root.all_indices().unwrap()),
            vec![0, 1, 2, 3, 4, 5, 6, 8, 9]
        );
        assert_eq!(canonical.root.children[0].children[0].id, "4,5,6");
        assert_eq!(canonical.root.children[0].children[0].children[0].id, "8,9");
    }

    #[test]
    fn test_parse_failure_returns_no_tree() {
        let tree = raw(json!({
            "index": 0,
            "node": "[]",
            "children": [{"index": 1, "node": "[uid=svc, mode=HTTP_ERROR(500)]"}]
        }));
        let err = canonicalize(&tree, &CanonicalizeOption::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailed);
    }

    fn chain(depth: i64) -> RawSearchNode {
        let mut node = RawSearchNode {
            index: depth,
            node: "[uid=leaf:GET /end#1, mode=HTTP_ERROR(500)]".to_string(),
            children: Vec::new(),
        };
        for index in (0..depth).rev() {
            node = RawSearchNode {
                index,
                node: "[uid=hop:GET /next#0, mode=HTTP_ERROR(503)]".to_string(),
                children: vec![node],
            };
        }
        node
    }

    #[test]
    fn test_very_deep_tree_canonicalizes() {
        let depth = 50_000;
        let raw = chain(depth);

        for combine in [true, false] {
            let option = CanonicalizeOption::new().with_combine(combine);
            let canonical = canonicalize(&raw, &option).unwrap();
            assert!(!canonical.needs_signature);
            assert_eq!(canonical.root.node_count(), depth as usize + 1);

            let flat = canonical.root.flatten();
            assert_eq!(flat[0].display_name, "leaf#1");
            assert_eq!(flat[0].index, depth);
        }
    }
}
