//! Search tree node types.

use fitviz_error::{Error, Result};

use crate::identifier::ParsedIdentifier;

/// Separator used when several original ids are folded into one node.
pub const ID_SEPARATOR: char = ',';

/// Remaining stack below which recursive tree walks switch to a fresh
/// segment of [`STACK_GROWTH`] bytes.
pub const RED_ZONE: usize = 64 * 1024;
pub const STACK_GROWTH: usize = 1024 * 1024;

/// One node of the in-memory search tree.
///
/// Children are exclusively owned; the tree never shares or cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    /// The original index as text, or the comma-joined ids of every node
    /// merged into this one, in merge order.
    pub id: String,
    /// Ordering value; the minimum contributor index for merged nodes.
    pub index: i64,
    /// Outcome classification; empty when absent or ambiguous after a merge.
    pub mode: String,
    /// Simplified endpoint signature, possibly empty.
    pub signature: String,
    /// Human-readable label, possibly several hops joined by `">\n"`.
    pub display_name: String,
    pub children: Vec<SearchNode>,
}

/// Grouping key used by the combiner. The signature is only part of the key
/// when the tree needs signatures to keep display names apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey<'a> {
    display_name: &'a str,
    signature: Option<&'a str>,
}

impl SearchNode {
    /// A node for one original search index.
    pub fn new(index: i64, parsed: ParsedIdentifier, children: Vec<SearchNode>) -> Self {
        Self {
            id: index.to_string(),
            index,
            mode: parsed.mode,
            signature: parsed.signature,
            display_name: parsed.display_name,
            children,
        }
    }

    /// Whether this node stands for more than one original index.
    pub fn is_merged(&self) -> bool {
        self.id.contains(ID_SEPARATOR)
    }

    /// The original indices folded into this node, in merge order.
    pub fn indices(&self) -> Result<Vec<i64>> {
        self.id
            .split(ID_SEPARATOR)
            .map(|part| {
                part.trim().parse::<i64>().map_err(|err| {
                    Error::invariant_violation("node id holds a non-integer index")
                        .with_operation("node::indices")
                        .with_context("id", self.id.clone())
                        .set_source(err)
                })
            })
            .collect()
    }

    pub fn group_key(&self, needs_signature: bool) -> GroupKey<'_> {
        GroupKey {
            display_name: &self.display_name,
            signature: needs_signature.then_some(self.signature.as_str()),
        }
    }

    /// All nodes of this subtree, children before their parent.
    pub fn flatten(&self) -> Vec<&SearchNode> {
        // Parent-first with children pushed left to right, then reversed.
        let mut pending = vec![self];
        let mut nodes = Vec::new();
        while let Some(node) = pending.pop() {
            nodes.push(node);
            pending.extend(node.children.iter());
        }
        nodes.reverse();
        nodes
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut pending = vec![self];
        let mut count = 0;
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }

    /// Every original index represented anywhere in this subtree.
    pub fn all_indices(&self) -> Result<Vec<i64>> {
        let mut indices = Vec::new();
        for node in self.flatten() {
            indices.extend(node.indices()?);
        }
        Ok(indices)
    }
}

impl Drop for SearchNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
