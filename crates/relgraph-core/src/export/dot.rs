//! Graphviz DOT rendering of the release-blocking graph.
//!
//! Only unreleased packages become nodes: yellow when nothing blocks them,
//! red otherwise. An edge `"p" -> "q"` means `p` is waiting on `q`. Edges are
//! only drawn between two exported nodes, so references to released or
//! unknown packages disappear instead of dangling. Node and edge blocks are
//! sorted by name so the output is stable across runs.

use std::collections::BTreeSet;

use tracing::instrument;

use crate::graph::Catalog;

const UNBLOCKED_COLOR: &str = "yellow";
const BLOCKED_COLOR: &str = "red";

/// Escape a package name for use inside a quoted DOT string.
fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Render `catalog` as a `digraph G { ... }` description.
#[must_use]
#[instrument(skip(catalog), fields(packages = catalog.len()))]
pub fn dot_graph(catalog: &Catalog) -> String {
    let exported = |name: &str| catalog.get(name).is_some_and(|pkg| !pkg.is_released());

    let mut nodes: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut edges: BTreeSet<(&str, &str)> = BTreeSet::new();

    for pkg in catalog.iter().filter(|pkg| !pkg.is_released()) {
        let color = if pkg.blocked_by.is_empty() {
            UNBLOCKED_COLOR
        } else {
            BLOCKED_COLOR
        };
        nodes.insert((pkg.name.as_str(), color));

        for blocker in pkg.blocked_by.iter().filter(|name| exported(name.as_str())) {
            edges.insert((pkg.name.as_str(), blocker.as_str()));
        }
        for blocked in pkg.blocking.iter().flatten().filter(|name| exported(name.as_str())) {
            edges.insert((blocked.as_str(), pkg.name.as_str()));
        }
    }

    let estimated_size = nodes.len() * 60 + edges.len() * 40 + 16;
    let mut output = String::with_capacity(estimated_size);
    output.push_str("digraph G {\n");

    let edge_lines: Vec<String> = edges
        .iter()
        .map(|(from, to)| format!("  \"{}\" -> \"{}\";", escape_label(from), escape_label(to)))
        .collect();
    let node_lines: Vec<String> = nodes
        .iter()
        .map(|(name, color)| {
            let name = escape_label(name);
            format!("  \"{name}\"[label=\"{name}\"][color={color}];")
        })
        .collect();

    output.push_str(&edge_lines.join("\n"));
    output.push('\n');
    output.push_str(&node_lines.join("\n"));
    output.push_str("\n}");
    output
}
