//! Release-blocking graph model.
//!
//! # Overview
//!
//! A [`Catalog`] holds one [`Package`] per name in loader order. Each package
//! lists what blocks it (`blocked_by`) and, optionally, what it blocks
//! (`blocking`, `recursive_blocking`). [`BlockingGraph`] is the petgraph view
//! used when a traversal is needed.
//!
//! ## Pipeline
//!
//! ```text
//! YAML document
//!        ↓  Catalog::from_yaml_str()
//! Catalog
//!        ↓  BlockingGraph::from_catalog()
//! BlockingGraph (DiGraph, edges blocker → blocked, cycles possible)
//! ```

pub mod build;
pub mod catalog;
pub mod package;

pub use build::BlockingGraph;
pub use catalog::Catalog;
pub use package::{Package, PackageRecord};
