//! Graphviz (DOT) export.
//!
//! Each vertex gets the identifier of its position in
//! [`DirectedGraph::vertices`], so the output only ever references integers
//! in `0..n` no matter what the vertex type is. Labels are quoted and escaped.

use std::fmt::{Display, Write as _};
use std::hash::Hash;

use crate::digraph::DirectedGraph;

impl<V> DirectedGraph<V>
where
    V: Clone + Eq + Hash + Display,
{
    /// Render the graph as a DOT `digraph`.
    ///
    /// One `k[label="..."];` statement per vertex, then one `i -> j;`
    /// statement per edge.
    #[must_use]
    pub fn graphviz(&self) -> String {
        let mut out = String::from("digraph {\n");

        for (k, v) in self.vertices().enumerate() {
            let label = self
                .vertex_label(v)
                .map(|label| escape_label(&label))
                .unwrap_or_default();
            let _ = writeln!(out, "{k}[label=\"{label}\"];");
        }

        for (u, v) in self.edges() {
            if let (Some(i), Some(j)) = (self.position(u), self.position(v)) {
                let _ = writeln!(out, "{i} -> {j};");
            }
        }

        out.push_str("}\n");
        out
    }
}

/// Escape a label for use inside a double-quoted DOT string.
fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}
