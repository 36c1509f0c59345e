//! Merging of structurally equivalent sibling subtrees.

use std::collections::HashMap;

use crate::node::{GroupKey, ID_SEPARATOR, RED_ZONE, STACK_GROWTH, SearchNode};

/// Return the canonical form of `node`: same root fields, with every level
/// of children grouped by key and each group folded into a single node.
///
/// The input tree is left untouched.
pub fn combine_tree(node: &SearchNode, needs_signature: bool) -> SearchNode {
    SearchNode {
        id: node.id.clone(),
        index: node.index,
        mode: node.mode.clone(),
        signature: node.signature.clone(),
        display_name: node.display_name.clone(),
        children: combine_children(node.children.iter().collect(), needs_signature),
    }
}

/// Group `children` by key in first-seen order and fold each group.
fn combine_children(children: Vec<&SearchNode>, needs_signature: bool) -> Vec<SearchNode> {
    let mut groups: Vec<Vec<&SearchNode>> = Vec::new();
    let mut slots: HashMap<GroupKey<'_>, usize> = HashMap::new();

    for child in children {
        let slot = *slots
            .entry(child.group_key(needs_signature))
            .or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
        groups[slot].push(child);
    }

    groups
        .iter()
        .map(|members| merge_group(members, needs_signature))
        .collect()
}

/// Fold one group of equal-keyed siblings into a single node whose children
/// are the concatenated children of all members, combined again.
fn merge_group(members: &[&SearchNode], needs_signature: bool) -> SearchNode {
    stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || {
        let first = members[0];

        let id = members
            .iter()
            .map(|m| m.id.as_str())
            .collect::<Vec<_>>()
            .join(&ID_SEPARATOR.to_string());
        let index = members.iter().map(|m| m.index).min().unwrap_or(first.index);
        let grandchildren: Vec<&SearchNode> =
            members.iter().flat_map(|m| m.children.iter()).collect();

        SearchNode {
            id,
            index,
            mode: String::new(),
            signature: first.signature.clone(),
            display_name: first.display_name.clone(),
            children: combine_children(grandchildren, needs_signature),
        }
    })
}
