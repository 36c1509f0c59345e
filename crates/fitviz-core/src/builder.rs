//! Building the owned search tree from the raw JSON document.

use std::path::Path;

use serde::Deserialize;
use serde_json::error::Category;

use fitviz_error::{Error, Result};

use crate::identifier::parse_identifier;
use crate::node::{RED_ZONE, STACK_GROWTH, SearchNode};

/// One level of the raw search tree as produced by the search process:
///
/// ```json
/// { "index": 0, "node": "[]", "children": [ { "index": 1, "node": "..." } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawSearchNode {
    pub index: i64,
    pub node: String,
    #[serde(default)]
    pub children: Vec<RawSearchNode>,
}

impl RawSearchNode {
    /// Parse a search tree document. Nesting depth is bounded only by
    /// memory: the recursion limit is off and the stack grows on demand.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_str(contents);
        de.disable_recursion_limit();
        Self::deserialize(serde_stacker::Deserializer::new(&mut de))
            .and_then(|raw| de.end().map(|()| raw))
            .map_err(|err| json_error(err).with_operation("builder::from_json_str"))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Self::deserialize(serde_stacker::Deserializer::new(value))
            .map_err(|err| json_error(err).with_operation("builder::from_value"))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            Error::from(err)
                .with_operation("builder::from_path")
                .with_context("path", path.display().to_string())
        })?;
        Self::from_json_str(&contents).map_err(|err| {
            err.with_operation("builder::from_path")
                .with_context("path", path.display().to_string())
        })
    }
}

impl Drop for RawSearchNode {
    // Unlink descendants one level at a time; the default drop recurses once
    // per tree level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Shape problems (a scalar where a node belongs, a missing field) are
/// `InvalidFormat`; broken JSON text is `DeserializationFailed`.
fn json_error(err: serde_json::Error) -> Error {
    let base = match err.classify() {
        Category::Data => Error::invalid_format("search tree node has an invalid shape"),
        _ => Error::deserialization_failed("invalid search tree JSON"),
    };
    base.with_context("line", err.line().to_string())
        .with_context("column", err.column().to_string())
        .set_source(err)
}

/// Build the owned search tree, parsing every node identifier.
///
/// Any identifier that fails to parse aborts the whole build; no partial
/// tree is returned.
pub fn build_tree(raw: &RawSearchNode) -> Result<SearchNode> {
    stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || {
        let parsed = parse_identifier(&raw.node).map_err(|err| {
            err.with_operation("builder::build_tree")
                .with_context("index", raw.index.to_string())
        })?;

        let children = raw
            .children
            .iter()
            .map(build_tree)
            .collect::<Result<Vec<_>>>()?;

        Ok(SearchNode::new(raw.index, parsed, children))
    })
}
