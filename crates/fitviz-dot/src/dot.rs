//! DOT format utilities for graph rendering.

use std::fmt::Write;

use crate::GraphSink;

/// Escape special characters for DOT quoted strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// A DOT graph builder for constructing valid DOT output.
///
/// Node ids are always quoted, so merged ids such as `1,2` are valid.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    /// Create a new DOT graph with the given name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {name} {{");
        Self { output, indent: 1 }
    }

    /// Create a new DOT graph preceded by a `//` comment line.
    pub fn with_comment(name: &str, comment: &str) -> Self {
        let mut output = String::with_capacity(4096);
        for line in comment.lines() {
            let _ = writeln!(output, "// {line}");
        }
        let _ = writeln!(output, "digraph {name} {{");
        Self { output, indent: 1 }
    }

    /// Add a graph attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    /// Add a node with an ID and label.
    pub fn node(&mut self, id: &str, label: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(
            self.output,
            "\"{}\" [label=\"{}\"];",
            escape_label(id),
            escape_label(label)
        );
        self
    }

    /// Add a labelled edge.
    pub fn edge(&mut self, from: &str, to: &str, label: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(
            self.output,
            "\"{}\" -> \"{}\" [label=\"{}\"];",
            escape_label(from),
            escape_label(to),
            escape_label(label)
        );
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

impl GraphSink for DotBuilder {
    fn declare_node(&mut self, id: &str, label: &str) {
        self.node(id, label);
    }

    fn declare_edge(&mut self, from: &str, to: &str, label: &str) {
        self.edge(from, to, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("a\nb"), "a\\nb");
        assert_eq!(escape_label("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_label(r"c:\x"), r"c:\\x");
        assert_eq!(escape_label("&empty;"), "&empty;");
    }

    #[test]
    fn test_builder_output() {
        let mut dot = DotBuilder::with_comment("G", "Faultspace Search");
        dot.attr("rankdir", "TB");
        dot.node("0", "&empty;");
        dot.node("1,2", "cart>\ndb\n503");
        dot.edge("0", "1,2", "1 - 2 (2)");

        let expected = "\
// Faultspace Search
digraph G {
  rankdir=\"TB\";
  \"0\" [label=\"&empty;\"];
  \"1,2\" [label=\"cart>\\ndb\\n503\"];
  \"0\" -> \"1,2\" [label=\"1 - 2 (2)\"];
}
";
        assert_eq!(dot.build(), expected);
    }

    #[test]
    fn test_empty_graph() {
        assert_eq!(DotBuilder::new("G").build(), "digraph G {\n}\n");
    }
}
