//! Whole-tree disambiguation check.

use std::collections::HashMap;

use crate::node::SearchNode;

/// Whether signatures must be shown next to display names.
///
/// True iff two nodes share a display name but differ in signature. The
/// answer must be taken over the complete tree before combining, since it
/// decides the merge key of every node.
pub fn needs_signature(nodes: &[&SearchNode]) -> bool {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        match seen.get(node.display_name.as_str()) {
            Some(signature) if *signature != node.signature => return true,
            Some(_) => {}
            None => {
                seen.insert(&node.display_name, &node.signature);
            }
        }
    }
    false
}
