//! Petgraph view of a [`Catalog`].
//!
//! ## Edge Direction
//!
//! An edge `A → B` in the graph means "A **blocks** B": A must release
//! before B can. Both sides of the catalog feed the same edge set:
//!
//! - `B.blocked_by` contains `A`  ⇒  edge `A → B`
//! - `A.blocking` contains `B`    ⇒  edge `A → B`
//!
//! The catalog does not have to agree with itself; an edge stated on only
//! one side is still added, and an edge stated on both sides is added once.
//! Names that only appear as references become bare nodes so traversals can
//! pass through them.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use tracing::instrument;

use crate::graph::catalog::Catalog;

/// A directed blocking graph. Nodes are package names.
#[derive(Debug)]
pub struct BlockingGraph {
    /// Directed graph: nodes = package names, edges = blocker → blocked.
    pub graph: DiGraph<String, ()>,
    /// Mapping from package name to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl BlockingGraph {
    /// Build the graph for every package in `catalog`, plus any name the
    /// catalog references without defining.
    #[instrument(skip(catalog), fields(packages = catalog.len()))]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut graph = DiGraph::<String, ()>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(catalog.len());

        for pkg in catalog {
            let idx = graph.add_node(pkg.name.clone());
            node_map.insert(pkg.name.clone(), idx);
        }

        let mut edges: Vec<(&str, &str)> = Vec::new();
        for pkg in catalog {
            edges.extend(pkg.blocked_by.iter().map(|blocker| (blocker.as_str(), pkg.name.as_str())));
            if let Some(blocking) = &pkg.blocking {
                edges.extend(blocking.iter().map(|blocked| (pkg.name.as_str(), blocked.as_str())));
            }
        }

        for (blocker, blocked) in edges {
            let blocker_idx = *node_map
                .entry(blocker.to_string())
                .or_insert_with(|| graph.add_node(blocker.to_string()));
            let blocked_idx = *node_map
                .entry(blocked.to_string())
                .or_insert_with(|| graph.add_node(blocked.to_string()));

            if !graph.contains_edge(blocker_idx, blocked_idx) {
                graph.add_edge(blocker_idx, blocked_idx, ());
            }
        }

        Self { graph, node_map }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// Names directly blocked by `name` (outgoing edges).
    #[must_use]
    pub fn direct_blocking(&self, name: &str) -> BTreeSet<String> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Names directly blocking `name` (incoming edges).
    #[must_use]
    pub fn direct_blockers(&self, name: &str) -> BTreeSet<String> {
        self.neighbors(name, Direction::Incoming)
    }

    /// Every name reachable from `name` along blocking edges, excluding
    /// `name` itself even when it sits on a cycle.
    #[must_use]
    pub fn transitive_blocking(&self, name: &str) -> BTreeSet<String> {
        let Some(start) = self.node_index(name) else {
            return BTreeSet::new();
        };
        let mut reached = BTreeSet::new();
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(idx) = dfs.next(&self.graph) {
            if idx != start {
                reached.insert(self.graph[idx].clone());
            }
        }
        reached
    }

    fn neighbors(&self, name: &str, direction: Direction) -> BTreeSet<String> {
        self.node_index(name)
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, direction)
                    .map(|n| self.graph[n].clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
