//! Node and edge label text.

use fitviz_core::SearchNode;
use fitviz_error::Result;

/// Display name, then the signature (only when the tree needs signatures and
/// the node has one), then the mode if any, one per line.
pub fn node_label(node: &SearchNode, needs_signature: bool) -> String {
    let mut parts = vec![node.display_name.as_str()];
    if needs_signature && !node.signature.is_empty() {
        parts.push(&node.signature);
    }
    if !node.mode.is_empty() {
        parts.push(&node.mode);
    }
    parts.join("\n")
}

/// Label for the edge leading into `child`.
///
/// A single original index is printed as-is; a merged node shows
/// `min - max (count)` over its indices.
pub fn edge_label(child: &SearchNode) -> Result<String> {
    if !child.is_merged() {
        return Ok(child.index.to_string());
    }
    let indices = child.indices()?;
    let min = indices.iter().min().copied().unwrap_or(child.index);
    let max = indices.iter().max().copied().unwrap_or(child.index);
    Ok(format!("{min} - {max} ({})", indices.len()))
}
