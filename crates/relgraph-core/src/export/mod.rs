//! Text exporters over a (possibly filtered) catalog.
//!
//! Each exporter is a pure function returning a `String` without a trailing
//! newline; callers decide how to write it.
//!
//! - [`dot_graph`]: Graphviz `digraph` of the unreleased packages
//! - [`ranked_report`]: `name (blocking N)` lines in rank order
//! - [`manifest`]: a `repositories:` checkout list for multi-repo tools

pub mod dot;
pub mod manifest;
pub mod report;

pub use dot::dot_graph;
pub use manifest::manifest;
pub use report::ranked_report;
